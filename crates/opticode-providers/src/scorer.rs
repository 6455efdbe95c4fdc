//! Security scorer backed by a Hugging Face text-classification endpoint.
//!
//! The classifier itself stays remote; this client posts the snippet to
//! `{api_base}/models/{model}` and returns the highest-scoring label.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use opticode_core::config::ScorerConfig;

use crate::error::ProviderError;
use crate::http_provider::{build_client, read_json};
use crate::traits::SecurityScorer;

/// Default Hugging Face inference base URL.
pub const DEFAULT_INFERENCE_BASE: &str = "https://api-inference.huggingface.co";

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// The inference API nests results per input; some deployments return them flat.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationOutput {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationOutput {
    fn top_label(self) -> Option<String> {
        let scores = match self {
            Self::Nested(batches) => batches.into_iter().next()?,
            Self::Flat(scores) => scores,
        };
        scores
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|s| s.label)
    }
}

pub struct HuggingFaceScorer {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for HuggingFaceScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceScorer")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl HuggingFaceScorer {
    pub fn new(config: &ScorerConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_INFERENCE_BASE.to_string()),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.api_base.trim_end_matches('/'), self.model)
    }
}

#[async_trait]
impl SecurityScorer for HuggingFaceScorer {
    async fn classify(&self, snippet: &str) -> Result<String, ProviderError> {
        let mut request = self
            .client
            .post(self.model_url())
            .json(&serde_json::json!({ "inputs": snippet }));
        // Self-hosted endpoints may run without a token
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.map_err(|e| {
            error!(model = %self.model, error = %e, "Scorer request failed");
            ProviderError::Http(e)
        })?;

        let body = read_json(response, "HuggingFace").await?;
        let output: ClassificationOutput = serde_json::from_value(body)
            .map_err(|e| ProviderError::Decode(format!("classification output: {e}")))?;
        let label = output
            .top_label()
            .ok_or_else(|| ProviderError::Decode("classification output has no labels".into()))?;

        debug!(model = %self.model, label = %label, "Snippet classified");
        Ok(label)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
