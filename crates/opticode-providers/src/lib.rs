//! Completion provider and security scorer clients for OptiCode.
//!
//! # Architecture
//!
//! - [`traits::CompletionProvider`] — trait both providers implement
//! - [`traits::SecurityScorer`] — trait the classifier client implements
//! - [`registry`] — static specs for Gemini and Groq + [`registry::create_provider`]
//! - [`http_provider::HttpProvider`] — OpenAI-compatible HTTP client (Groq)
//! - [`gemini::GeminiProvider`] — native `generateContent` client
//! - [`scorer::HuggingFaceScorer`] — text-classification inference client

pub mod error;
pub mod gemini;
pub mod http_provider;
pub mod registry;
pub mod scorer;
pub mod traits;

// Re-export main types for convenience
pub use error::ProviderError;
pub use gemini::GeminiProvider;
pub use http_provider::HttpProvider;
pub use registry::{create_provider, find_by_name, spec_for, ProviderSpec, PROVIDERS};
pub use scorer::HuggingFaceScorer;
pub use traits::{CompletionProvider, SecurityScorer};
