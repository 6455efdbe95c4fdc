//! Provider and scorer traits — the seams the server dispatches through.
//!
//! `HttpProvider` (OpenAI-compatible, used for Groq) and `GeminiProvider`
//! implement [`CompletionProvider`]; `HuggingFaceScorer` implements
//! [`SecurityScorer`]. Tests substitute their own implementations.

use async_trait::async_trait;

use crate::error::ProviderError;

/// A hosted text-completion service.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send `prompt` as a single-turn user message and return the completion text.
    ///
    /// If the response carries no text where the API normally puts it, the
    /// implementation returns the whole response JSON rendered as a string
    /// instead of failing.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// The fixed model identifier this provider sends.
    fn model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}

/// A binary code classifier returning a raw label (e.g. `"LABEL_1"`).
#[async_trait]
pub trait SecurityScorer: Send + Sync {
    /// Classify `snippet` and return the top label.
    async fn classify(&self, snippet: &str) -> Result<String, ProviderError>;

    /// Classifier model identifier, for logs.
    fn model(&self) -> &str;
}
