//! The `/analyze` pipeline: score → prompt → dispatch → respond.
//!
//! Each stage returns a value or an [`AnalyzeError`]; the HTTP layer maps
//! the error kinds to their distinct response shapes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

use opticode_core::utils::take_chars;
use opticode_core::{AnalysisRequest, AnalysisResponse, ModelChoice, SecurityScore};
use opticode_providers::ProviderError;

use crate::state::{AppState, Capability, ProviderHandle, ScorerHandle};

/// Characters of `code` the scorer sees.
pub const SCORER_INPUT_CHARS: usize = 512;

/// Classifier label meaning "insecure".
pub const INSECURE_LABEL: &str = "LABEL_1";

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The requested provider was not initialized at startup.
    #[error("{} client not available", .0.display_name())]
    Unavailable(ModelChoice),

    /// Any other failure while producing the analysis.
    #[error(transparent)]
    Internal(#[from] ProviderError),
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        match self {
            err @ Self::Unavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "detail": err.to_string() })),
            )
                .into_response(),
            // Unexpected failures keep a 200 status with an error-shaped body
            Self::Internal(e) => {
                (StatusCode::OK, Json(AnalysisResponse::backend_error(e))).into_response()
            }
        }
    }
}

/// Run the full pipeline for one request.
///
/// Provider presence is checked before the scorer runs, so an unavailable
/// provider aborts the request without doing any work.
pub async fn analyze(
    state: &AppState,
    request: &AnalysisRequest,
) -> Result<AnalysisResponse, AnalyzeError> {
    let choice = request.model_choice();
    let provider = select_provider(state, choice)?;

    let security_score = score(&state.scorer, &request.code).await;
    let prompt = build_prompt(security_score, &request.code);

    debug!(
        provider = provider.display_name(),
        score = %security_score,
        prompt_chars = prompt.len(),
        "Dispatching analysis"
    );
    let analysis = provider.complete(&prompt).await?;

    Ok(AnalysisResponse::new(security_score, analysis))
}

/// Resolve the handle for `choice`. Never falls back to the other provider.
pub fn select_provider(
    state: &AppState,
    choice: ModelChoice,
) -> Result<&ProviderHandle, AnalyzeError> {
    match state.provider(choice) {
        Capability::Present(provider) => Ok(provider),
        Capability::Absent { reason } => {
            warn!(provider = choice.display_name(), reason = %reason, "Provider unavailable");
            Err(AnalyzeError::Unavailable(choice))
        }
    }
}

/// Best-effort scoring; failures and absence both yield `Unknown`.
pub async fn score(scorer: &Capability<ScorerHandle>, code: &str) -> SecurityScore {
    let Capability::Present(scorer) = scorer else {
        return SecurityScore::Unknown;
    };
    if code.is_empty() {
        return SecurityScore::Unknown;
    }

    match scorer.classify(take_chars(code, SCORER_INPUT_CHARS)).await {
        Ok(label) => label_to_score(&label),
        Err(e) => {
            error!(model = scorer.model(), error = %e, "Security scanner failed during analysis");
            SecurityScore::Unknown
        }
    }
}

pub fn label_to_score(label: &str) -> SecurityScore {
    if label == INSECURE_LABEL {
        SecurityScore::Insecure
    } else {
        SecurityScore::Secure
    }
}

/// The review prompt. `code` is embedded verbatim.
pub fn build_prompt(score: SecurityScore, code: &str) -> String {
    format!(
        "Review this code which the scanner marked as {score}.\n\
         Provide a brief bug report and then the fully optimized version.\n\
         \n\
         CODE:\n\
         {code}\n"
    )
}
