//! Core types for OptiCode — the `/analyze` payloads and the chat completion
//! wire format shared by the providers.
//!
//! The analysis types are the public HTTP contract. The chat types model the
//! OpenAI chat completions API used by OpenAI-compatible providers (Groq).

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────
// Analysis request / response
// ─────────────────────────────────────────────

/// Default value of [`AnalysisRequest::model`].
pub const DEFAULT_MODEL: &str = "gemini";

/// Body of `POST /analyze`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRequest {
    /// Source code to review, interpolated verbatim into the prompt.
    pub code: String,
    /// Requested provider. `"groq"` selects Groq, anything else Gemini.
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl AnalysisRequest {
    pub fn new(code: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            model: model.into(),
        }
    }

    /// The provider this request is routed to.
    pub fn model_choice(&self) -> ModelChoice {
        ModelChoice::from_request(&self.model)
    }
}

/// Body returned by `POST /analyze` on success and on unexpected failure.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResponse {
    pub security_score: SecurityScore,
    pub analysis: String,
}

impl AnalysisResponse {
    pub fn new(security_score: SecurityScore, analysis: impl Into<String>) -> Self {
        Self {
            security_score,
            analysis: analysis.into(),
        }
    }

    /// Error-shaped payload: `security_score = "error"`, HTTP status stays 200.
    pub fn backend_error(msg: impl fmt::Display) -> Self {
        Self {
            security_score: SecurityScore::Error,
            analysis: format!("Backend Error: {msg}"),
        }
    }
}

/// Verdict attached to every analysis response.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SecurityScore {
    Secure,
    Insecure,
    Unknown,
    Error,
}

impl SecurityScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Secure => "secure",
            Self::Insecure => "insecure",
            Self::Unknown => "unknown",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SecurityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two completion providers a request can be routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelChoice {
    Gemini,
    Groq,
}

impl ModelChoice {
    /// Map the free-form `model` field to a provider.
    ///
    /// Only the exact string `"groq"` selects Groq; every other value,
    /// including unknown ones, routes to Gemini.
    pub fn from_request(model: &str) -> Self {
        if model == "groq" {
            Self::Groq
        } else {
            Self::Gemini
        }
    }

    /// Registry name of the provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Groq => "groq",
        }
    }

    /// Human-readable name for logs and error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::Groq => "Groq",
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────────────────────────────
// Messages (OpenAI chat completions format)
// ─────────────────────────────────────────────

/// A chat message in the OpenAI format. Each variant maps to a `role` value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User { content: String },
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }
}

/// Request body for an OpenAI-compatible chat completion API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
