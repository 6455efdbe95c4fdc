//! OptiCode HTTP backend: code review via hosted LLM providers.
//!
//! - [`lifecycle`] — startup probing of scorer/providers, teardown hook
//! - [`analyze`] — the `/analyze` pipeline
//! - [`app`] — axum router (API, frontend, CORS, request logging)

pub mod analyze;
pub mod api;
pub mod app;
pub mod lifecycle;
pub mod logging;
pub mod state;
