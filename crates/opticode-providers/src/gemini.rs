//! Gemini provider — Google Generative Language `generateContent` API.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use opticode_core::config::ProviderConfig;

use crate::error::ProviderError;
use crate::http_provider::{build_client, read_json};
use crate::registry::ProviderSpec;
use crate::traits::CompletionProvider;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

pub struct GeminiProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    spec: &'static ProviderSpec,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.spec.model)
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(config: &ProviderConfig, spec: &'static ProviderSpec) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            api_base: spec.resolve_api_base(config),
            api_key: config.api_key.clone(),
            spec,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.spec.model
        )
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!(
            provider = self.spec.display_name,
            model = self.spec.model,
            prompt_chars = prompt.len(),
            "Calling completion API"
        );

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = self.spec.display_name, error = %e, "HTTP request failed");
                ProviderError::Http(e)
            })?;

        let body = read_json(response, self.spec.display_name).await?;
        Ok(extract_candidate_text(&body).unwrap_or_else(|| body.to_string()))
    }

    fn model(&self) -> &str {
        self.spec.model
    }

    fn display_name(&self) -> &str {
        self.spec.display_name
    }
}

/// Concatenate the text parts of the first candidate.
///
/// `None` when the first candidate has no text part at all (blocked prompt,
/// empty candidate list, function-call only output).
pub fn extract_candidate_text(body: &Value) -> Option<String> {
    let parts = body.pointer("/candidates/0/content/parts")?.as_array()?;
    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::find_by_name;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gemini(api_base: &str) -> GeminiProvider {
        let config = ProviderConfig {
            api_key: "gm-test".to_string(),
            api_base: Some(api_base.to_string()),
            ..Default::default()
        };
        GeminiProvider::new(&config, find_by_name("gemini").unwrap()).unwrap()
    }

    #[test]
    fn test_generate_url() {
        let provider = gemini("https://generativelanguage.googleapis.com/v1beta/");
        assert_eq!(
            provider.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_extract_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Bug: " }, { "text": "none" }], "role": "model" }
            }]
        });
        assert_eq!(extract_candidate_text(&body).as_deref(), Some("Bug: none"));
    }

    #[test]
    fn test_extract_missing_text() {
        assert!(extract_candidate_text(&json!({ "candidates": [] })).is_none());
        assert!(extract_candidate_text(&json!({ "promptFeedback": { "blockReason": "SAFETY" } })).is_none());
        assert!(extract_candidate_text(&json!({
            "candidates": [{ "content": { "parts": [{ "functionCall": {} }] } }]
        }))
        .is_none());
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "gm-test"))
            .and(body_partial_json(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "review me" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "OK" }], "role": "model" },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&mock_server)
            .await;

        let text = gemini(&mock_server.uri()).complete("review me").await.unwrap();
        assert_eq!(text, "OK");
    }

    #[tokio::test]
    async fn test_complete_blocked_falls_back_to_body() {
        let mock_server = MockServer::start().await;
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&mock_server)
            .await;

        let text = gemini(&mock_server.uri()).complete("x").await.unwrap();
        assert_eq!(text, body.to_string());
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .mount(&mock_server)
            .await;

        let err = gemini(&mock_server.uri()).complete("x").await.unwrap_err();
        assert!(err.to_string().contains("API key not valid"));
    }
}
