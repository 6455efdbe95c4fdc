//! Errors returned by provider and scorer clients.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request never produced a response (connect, timeout, TLS…).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body could not be interpreted.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Whether the request timed out (only meaningful for [`ProviderError::Http`]).
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
