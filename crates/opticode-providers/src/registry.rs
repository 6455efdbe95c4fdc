//! Provider registry — static specs for the two supported completion providers.
//!
//! Each `ProviderSpec` describes how to reach a provider: which env var holds
//! its key, the default API base, the fixed model it is called with, and which
//! wire format it speaks.

use std::sync::Arc;

use tracing::debug;

use opticode_core::config::ProviderConfig;
use opticode_core::ModelChoice;

use crate::error::ProviderError;
use crate::gemini::GeminiProvider;
use crate::http_provider::HttpProvider;
use crate::traits::CompletionProvider;

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// Wire format a provider speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiStyle {
    /// OpenAI-compatible `/chat/completions`.
    OpenAiCompatible,
    /// Google Generative Language `models/{model}:generateContent`.
    GeminiNative,
}

/// Static specification describing one completion provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Internal name, matches `ModelChoice::name()`.
    pub name: &'static str,
    /// Environment variable for the API key.
    pub env_key: &'static str,
    /// Human-readable name for logs.
    pub display_name: &'static str,
    /// Default API base URL.
    pub default_api_base: &'static str,
    /// Model identifier sent with every request. Not caller-configurable.
    pub model: &'static str,
    pub api_style: ApiStyle,
}

/// Both supported providers.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        name: "gemini",
        env_key: "GEMINI_API_KEY",
        display_name: "Gemini",
        default_api_base: "https://generativelanguage.googleapis.com/v1beta",
        model: "gemini-2.0-flash",
        api_style: ApiStyle::GeminiNative,
    },
    ProviderSpec {
        name: "groq",
        env_key: "GROQ_API_KEY",
        display_name: "Groq",
        default_api_base: "https://api.groq.com/openai/v1",
        model: "llama-3.3-70b-versatile",
        api_style: ApiStyle::OpenAiCompatible,
    },
];

// ─────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────

/// Find a provider spec by exact name.
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.name == name)
}

/// The spec a routed request uses.
pub fn spec_for(choice: ModelChoice) -> &'static ProviderSpec {
    match choice {
        ModelChoice::Gemini => &PROVIDERS[0],
        ModelChoice::Groq => &PROVIDERS[1],
    }
}

impl ProviderSpec {
    /// API base to use: config override, else the spec default.
    pub fn resolve_api_base(&self, config: &ProviderConfig) -> String {
        config
            .api_base
            .clone()
            .unwrap_or_else(|| self.default_api_base.to_string())
    }
}

// ─────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────

/// Build the client for `spec` from its config.
///
/// Does not check `config.is_configured()`; callers decide whether a missing
/// key means "absent".
pub fn create_provider(
    spec: &'static ProviderSpec,
    config: &ProviderConfig,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    debug!(
        provider = spec.display_name,
        model = spec.model,
        api_base = config.api_base.as_deref().unwrap_or("default"),
        "Creating completion provider"
    );

    let provider: Arc<dyn CompletionProvider> = match spec.api_style {
        ApiStyle::OpenAiCompatible => Arc::new(HttpProvider::new(config, spec)?),
        ApiStyle::GeminiNative => Arc::new(GeminiProvider::new(config, spec)?),
    };
    Ok(provider)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
