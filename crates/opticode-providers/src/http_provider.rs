//! Generic HTTP-based provider for OpenAI-compatible APIs.
//!
//! Talks directly to a `/chat/completions` endpoint via `reqwest`. Groq is
//! served by this client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use opticode_core::config::ProviderConfig;
use opticode_core::types::{ChatCompletionRequest, Message};
use opticode_core::utils::truncate_string;

use crate::error::ProviderError;
use crate::registry::ProviderSpec;
use crate::traits::CompletionProvider;

// ─────────────────────────────────────────────
// HttpProvider
// ─────────────────────────────────────────────

/// A completion provider that talks to any OpenAI-compatible HTTP API.
pub struct HttpProvider {
    /// HTTP client (shared, connection-pooled, bounded timeout).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.groq.com/openai/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    spec: &'static ProviderSpec,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.spec.model)
            .field("provider", &self.spec.display_name)
            .finish()
    }
}

impl HttpProvider {
    /// Create a new HttpProvider from a provider config and spec.
    pub fn new(config: &ProviderConfig, spec: &'static ProviderSpec) -> Result<Self, ProviderError> {
        Ok(HttpProvider {
            client: build_client(config.timeout_secs)?,
            api_base: spec.resolve_api_base(config),
            api_key: config.api_key.clone(),
            spec,
        })
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl CompletionProvider for HttpProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!(
            provider = self.spec.display_name,
            model = self.spec.model,
            prompt_chars = prompt.len(),
            "Calling completion API"
        );

        let request_body = ChatCompletionRequest {
            model: self.spec.model.to_string(),
            messages: vec![Message::user(prompt)],
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = self.spec.display_name, error = %e, "HTTP request failed");
                ProviderError::Http(e)
            })?;

        let body = read_json(response, self.spec.display_name).await?;
        let text = extract_chat_text(&body);
        debug!(
            provider = self.spec.display_name,
            chars = text.len(),
            "Completion received"
        );
        Ok(text)
    }

    fn model(&self) -> &str {
        self.spec.model
    }

    fn display_name(&self) -> &str {
        self.spec.display_name
    }
}

/// `choices[0].message.content`, or the whole body as a string if absent.
pub fn extract_chat_text(body: &Value) -> String {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

// ─────────────────────────────────────────────
// Shared HTTP helpers
// ─────────────────────────────────────────────

/// Build a `reqwest::Client` with a bounded per-request timeout.
pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(ProviderError::Build)
}

/// Check the status and decode a JSON body, logging API errors.
pub(crate) async fn read_json(
    response: reqwest::Response,
    provider: &str,
) -> Result<Value, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        error!(provider, status = %status, body = %truncate_string(&body, 500), "API error");
        return Err(ProviderError::Api { status, body });
    }

    response.json::<Value>().await.map_err(|e| {
        error!(provider, error = %e, "Failed to parse response");
        ProviderError::Decode(e.to_string())
    })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
