//! Configuration schema.
//!
//! Hierarchy: `Config` → `ServerConfig`, `ProvidersConfig`, `ScorerConfig`.
//! Every field has a default; the loader only ever overrides from the
//! environment, there is no config file.

use serde::Serialize;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — defaults plus environment overrides.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
    pub scorer: ScorerConfig,
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP listener and frontend location.
#[derive(Clone, Debug, Serialize)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port (`PORT`).
    pub port: u16,
    /// Directory holding the prebuilt frontend (`index.html` + assets).
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "../frontend".to_string(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Default timeout for one completion call, in seconds.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 120;

/// Configuration for a single completion provider.
#[derive(Clone, Debug, Serialize)]
pub struct ProviderConfig {
    /// API key. Empty means "not configured".
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Custom API base URL (overrides the registry default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Upper bound on a single completion call.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: None,
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Both provider configurations.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProvidersConfig {
    pub gemini: ProviderConfig,
    pub groq: ProviderConfig,
}

impl ProvidersConfig {
    /// Get a provider config by registry name (`"gemini"` or `"groq"`).
    pub fn get_by_name(&self, name: &str) -> Option<&ProviderConfig> {
        match name {
            "gemini" => Some(&self.gemini),
            "groq" => Some(&self.groq),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────
// Scorer
// ─────────────────────────────────────────────

/// Hugging Face model used by the security scorer.
pub const DEFAULT_SCORER_MODEL: &str = "mrm8488/codebert-base-finetuned-detect-insecure-code";

/// Security scorer (text-classification inference endpoint).
#[derive(Clone, Debug, Serialize)]
pub struct ScorerConfig {
    /// Off by default: the scorer is only built when explicitly enabled.
    pub enabled: bool,
    /// Inference API token.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Custom inference base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Classifier model identifier.
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            api_base: None,
            model: DEFAULT_SCORER_MODEL.to_string(),
            timeout_secs: 30,
        }
    }
}
