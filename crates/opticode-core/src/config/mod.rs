//! Configuration system — schema, and env var loading.
//!
//! # Usage
//! ```no_run
//! use opticode_core::config;
//!
//! let cfg = config::load_config();
//! println!("Port: {}", cfg.server.port);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{apply_env_overrides, load_config};
pub use schema::{Config, ProviderConfig, ProvidersConfig, ScorerConfig, ServerConfig};
