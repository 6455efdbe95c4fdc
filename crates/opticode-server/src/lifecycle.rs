//! Startup and teardown.
//!
//! Startup sequence:
//! 1. Security scorer (only when `scorer.enabled`)
//! 2. Gemini provider
//! 3. Groq provider
//! 4. Frontend directory
//!
//! Every step degrades to an absent capability on failure; startup itself
//! never fails and never retries.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use opticode_core::config::{Config, ScorerConfig, ServerConfig};
use opticode_core::utils::expand_home;
use opticode_core::ModelChoice;
use opticode_providers::{create_provider, spec_for, HuggingFaceScorer};

use crate::state::{AppState, Capability, ProviderHandle, ScorerHandle};

/// Probe every capability and assemble the shared state.
pub fn startup(config: &Config) -> AppState {
    let state = AppState {
        scorer: init_scorer(&config.scorer),
        gemini: init_provider(config, ModelChoice::Gemini),
        groq: init_provider(config, ModelChoice::Groq),
        static_dir: resolve_static_dir(&config.server),
        started_at: Utc::now(),
    };

    info!(
        scorer = state.scorer.is_present(),
        gemini = state.gemini.is_present(),
        groq = state.groq.is_present(),
        "Capabilities initialized"
    );
    if !state.gemini.is_present() && !state.groq.is_present() {
        warn!("No completion provider available; /analyze will answer 503");
    }

    state
}

/// Teardown hook, run after the server stops accepting requests.
pub fn shutdown() {
    info!("Shutting down OptiCode backend");
}

fn init_scorer(config: &ScorerConfig) -> Capability<ScorerHandle> {
    if !config.enabled {
        warn!("Security scanner disabled (set OPTICODE_SCORER__ENABLED=true to enable)");
        return Capability::absent("disabled by configuration");
    }

    if config.api_key.is_empty() && config.api_base.is_none() {
        warn!("Security scanner enabled without HF_API_TOKEN; inference calls may be rejected");
    }

    match HuggingFaceScorer::new(config) {
        Ok(scorer) => {
            info!(model = %config.model, "Security scanner ready");
            Capability::Present(Arc::new(scorer))
        }
        Err(e) => {
            error!(error = %e, "Failed to load security scanner");
            Capability::absent(e.to_string())
        }
    }
}

fn init_provider(config: &Config, choice: ModelChoice) -> Capability<ProviderHandle> {
    let spec = spec_for(choice);
    let Some(provider_config) = config.providers.get_by_name(spec.name) else {
        return Capability::absent("no configuration section");
    };

    if !provider_config.is_configured() {
        warn!("{} not set; {} client disabled", spec.env_key, spec.display_name);
        return Capability::absent(format!("{} not set", spec.env_key));
    }

    match create_provider(spec, provider_config) {
        Ok(provider) => {
            info!(provider = spec.display_name, model = spec.model, "Provider client ready");
            Capability::Present(provider)
        }
        Err(e) => {
            error!(provider = spec.display_name, error = %e, "Failed to initialize client");
            Capability::absent(e.to_string())
        }
    }
}

fn resolve_static_dir(config: &ServerConfig) -> Option<PathBuf> {
    let dir = expand_home(&config.static_dir);
    if dir.is_dir() {
        info!(dir = %dir.display(), "Serving frontend");
        Some(dir)
    } else {
        warn!(
            "Frontend directory not found at {}. Static files won't be served.",
            dir.display()
        );
        None
    }
}
