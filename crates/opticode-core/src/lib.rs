//! Core types, configuration, and utilities shared by the OptiCode crates.

pub mod config;
pub mod types;
pub mod utils;

pub use types::{AnalysisRequest, AnalysisResponse, ModelChoice, SecurityScore};
