//! Config loader — defaults, then `.env`, then process environment.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. Plain variables: `GEMINI_API_KEY`, `GROQ_API_KEY`, `HF_API_TOKEN`, `PORT`
//! 3. Namespaced variables `OPTICODE_<SECTION>__<FIELD>` (override plain ones)
//!
//! A `.env` file in the working directory is merged into the process
//! environment first; variables already set are not replaced.

use std::str::FromStr;

use tracing::{debug, warn};

use super::schema::{Config, ProviderConfig};

/// Load configuration from the environment (and `.env`, if present).
pub fn load_config() -> Config {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }

    apply_env_overrides(Config::default(), |key| std::env::var(key).ok())
}

/// Apply environment overrides on top of `config`, reading through `lookup`.
///
/// Supported variables:
/// - `GEMINI_API_KEY`, `GROQ_API_KEY` → `providers.<name>.api_key`
/// - `HF_API_TOKEN` → `scorer.api_key`
/// - `PORT` → `server.port`
/// - `OPTICODE_SERVER__HOST` / `__PORT` / `__STATIC_DIR`
/// - `OPTICODE_PROVIDERS__<NAME>__API_KEY` / `__API_BASE` / `__TIMEOUT_SECS`
/// - `OPTICODE_SCORER__ENABLED` / `__API_KEY` / `__API_BASE` / `__MODEL` / `__TIMEOUT_SECS`
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // Plain variables
    if let Some(val) = lookup("GEMINI_API_KEY") {
        config.providers.gemini.api_key = val;
    }
    if let Some(val) = lookup("GROQ_API_KEY") {
        config.providers.groq.api_key = val;
    }
    if let Some(val) = lookup("HF_API_TOKEN") {
        config.scorer.api_key = val;
    }
    if let Some(port) = parse_var(&lookup, "PORT") {
        config.server.port = port;
    }

    // Server
    if let Some(val) = lookup("OPTICODE_SERVER__HOST") {
        config.server.host = val;
    }
    if let Some(port) = parse_var(&lookup, "OPTICODE_SERVER__PORT") {
        config.server.port = port;
    }
    if let Some(val) = lookup("OPTICODE_SERVER__STATIC_DIR") {
        config.server.static_dir = val;
    }

    // Providers
    apply_provider_env(&lookup, &mut config.providers.gemini, "GEMINI");
    apply_provider_env(&lookup, &mut config.providers.groq, "GROQ");

    // Scorer
    if let Some(enabled) = parse_bool(&lookup, "OPTICODE_SCORER__ENABLED") {
        config.scorer.enabled = enabled;
    }
    if let Some(val) = lookup("OPTICODE_SCORER__API_KEY") {
        config.scorer.api_key = val;
    }
    if let Some(val) = lookup("OPTICODE_SCORER__API_BASE") {
        config.scorer.api_base = Some(val);
    }
    if let Some(val) = lookup("OPTICODE_SCORER__MODEL") {
        config.scorer.model = val;
    }
    if let Some(secs) = parse_var(&lookup, "OPTICODE_SCORER__TIMEOUT_SECS") {
        config.scorer.timeout_secs = secs;
    }

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env<F>(lookup: &F, provider: &mut ProviderConfig, name: &str)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(&format!("OPTICODE_PROVIDERS__{name}__API_KEY")) {
        provider.api_key = val;
    }
    if let Some(val) = lookup(&format!("OPTICODE_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
    if let Some(secs) = parse_var(lookup, &format!("OPTICODE_PROVIDERS__{name}__TIMEOUT_SECS")) {
        provider.timeout_secs = secs;
    }
}

/// Parse a variable, ignoring (with a warning) values that don't parse.
fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

/// Parse a boolean variable, ignoring (with a warning) unrecognised spellings.
fn parse_bool<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(vars: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        apply_env_overrides(Config::default(), |key| env.get(key).cloned())
    }

    #[test]
    fn test_empty_env_keeps_defaults() {
        let config = load_from(&[]);
        assert_eq!(config.server.port, 3000);
        assert!(!config.providers.gemini.is_configured());
        assert!(!config.providers.groq.is_configured());
        assert!(!config.scorer.enabled);
    }

    #[test]
    fn test_provider_keys() {
        let config = load_from(&[("GEMINI_API_KEY", "gm-key"), ("GROQ_API_KEY", "gsk-key")]);
        assert_eq!(config.providers.gemini.api_key, "gm-key");
        assert_eq!(config.providers.groq.api_key, "gsk-key");
    }

    #[test]
    fn test_port_override() {
        let config = load_from(&[("PORT", "8080")]);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_port_ignored() {
        let config = load_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_namespaced_overrides_plain() {
        let config = load_from(&[
            ("PORT", "8080"),
            ("OPTICODE_SERVER__PORT", "9090"),
            ("GROQ_API_KEY", "plain"),
            ("OPTICODE_PROVIDERS__GROQ__API_KEY", "namespaced"),
        ]);
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.providers.groq.api_key, "namespaced");
    }

    #[test]
    fn test_provider_base_and_timeout() {
        let config = load_from(&[
            ("OPTICODE_PROVIDERS__GEMINI__API_BASE", "http://localhost:9999"),
            ("OPTICODE_PROVIDERS__GEMINI__TIMEOUT_SECS", "15"),
        ]);
        assert_eq!(
            config.providers.gemini.api_base.as_deref(),
            Some("http://localhost:9999")
        );
        assert_eq!(config.providers.gemini.timeout_secs, 15);
        assert_eq!(config.providers.groq.timeout_secs, 120);
    }

    #[test]
    fn test_scorer_toggle() {
        for (raw, expected) in [
            ("true", true),
            ("1", true),
            ("ON", true),
            ("false", false),
            ("0", false),
            ("off", false),
        ] {
            let config = load_from(&[("OPTICODE_SCORER__ENABLED", raw)]);
            assert_eq!(config.scorer.enabled, expected, "value {raw:?}");
        }
    }

    #[test]
    fn test_invalid_bool_keeps_default() {
        for raw in ["enable", "", "2"] {
            let config = load_from(&[("OPTICODE_SCORER__ENABLED", raw)]);
            assert!(!config.scorer.enabled, "value {raw:?}");
        }

        let mut enabled = Config::default();
        enabled.scorer.enabled = true;
        let config = apply_env_overrides(enabled, |key| {
            (key == "OPTICODE_SCORER__ENABLED").then(|| "enabled".to_string())
        });
        assert!(config.scorer.enabled);
    }

    #[test]
    fn test_scorer_token_sources() {
        let config = load_from(&[("HF_API_TOKEN", "hf_plain")]);
        assert_eq!(config.scorer.api_key, "hf_plain");

        let config = load_from(&[
            ("HF_API_TOKEN", "hf_plain"),
            ("OPTICODE_SCORER__API_KEY", "hf_namespaced"),
            ("OPTICODE_SCORER__MODEL", "org/other-model"),
        ]);
        assert_eq!(config.scorer.api_key, "hf_namespaced");
        assert_eq!(config.scorer.model, "org/other-model");
    }

    #[test]
    fn test_static_dir_override() {
        let config = load_from(&[("OPTICODE_SERVER__STATIC_DIR", "/srv/frontend")]);
        assert_eq!(config.server.static_dir, "/srv/frontend");
    }
}
