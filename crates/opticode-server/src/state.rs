//! Shared, read-only application state.
//!
//! Built once by [`crate::lifecycle::startup`] and cloned into every handler.
//! Nothing in here is mutated after startup, so no locking is needed.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use opticode_core::ModelChoice;
use opticode_providers::{CompletionProvider, SecurityScorer};

/// An external capability probed at startup: either usable or absent.
#[derive(Clone)]
pub enum Capability<T> {
    Present(T),
    Absent { reason: String },
}

impl<T> Capability<T> {
    pub fn absent(reason: impl Into<String>) -> Self {
        Self::Absent {
            reason: reason.into(),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

impl<T> fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(_) => f.write_str("Present"),
            Self::Absent { reason } => write!(f, "Absent({reason})"),
        }
    }
}

pub type ProviderHandle = Arc<dyn CompletionProvider>;
pub type ScorerHandle = Arc<dyn SecurityScorer>;

#[derive(Clone, Debug)]
pub struct AppState {
    pub scorer: Capability<ScorerHandle>,
    pub gemini: Capability<ProviderHandle>,
    pub groq: Capability<ProviderHandle>,
    /// Frontend directory; `None` when it did not exist at startup.
    pub static_dir: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// State with every capability absent and no frontend.
    pub fn empty() -> Self {
        Self {
            scorer: Capability::absent("not configured"),
            gemini: Capability::absent("not configured"),
            groq: Capability::absent("not configured"),
            static_dir: None,
            started_at: Utc::now(),
        }
    }

    /// The provider handle a request routed to `choice` must use.
    pub fn provider(&self, choice: ModelChoice) -> &Capability<ProviderHandle> {
        match choice {
            ModelChoice::Gemini => &self.gemini,
            ModelChoice::Groq => &self.groq,
        }
    }
}
