//! HTTP handlers.

use axum::extract::{Extension, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use opticode_core::AnalysisRequest;

use crate::analyze::{analyze, AnalyzeError};
use crate::logging::TraceId;
use crate::state::AppState;

/// Default document served at `/`.
pub const INDEX_FILE: &str = "index.html";

/// `POST /analyze`
pub async fn analyze_code(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
    Json(payload): Json<AnalysisRequest>,
) -> Response {
    let choice = payload.model_choice();
    info!(
        trace_id = %trace_id.0,
        model = %choice,
        code_chars = payload.code.chars().count(),
        "Analysis requested"
    );

    match analyze(&state, &payload).await {
        Ok(response) => {
            info!(trace_id = %trace_id.0, score = %response.security_score, "Analysis complete");
            Json(response).into_response()
        }
        Err(err) => {
            if let AnalyzeError::Internal(ref e) = err {
                error!(
                    trace_id = %trace_id.0,
                    provider = %choice,
                    timeout = e.is_timeout(),
                    error = ?e,
                    "Error during analysis"
                );
            }
            err.into_response()
        }
    }
}

#[derive(Serialize)]
pub struct ProviderStatus {
    pub gemini: bool,
    pub groq: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub started_at: String,
    pub providers: ProviderStatus,
    pub scorer: bool,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        started_at: state.started_at.to_rfc3339(),
        providers: ProviderStatus {
            gemini: state.gemini.is_present(),
            groq: state.groq.is_present(),
        },
        scorer: state.scorer.is_present(),
    })
}

/// `GET /` — the frontend's `index.html`, or 404 if it is missing.
pub async fn serve_index(State(state): State<AppState>) -> Response {
    let Some(dir) = state.static_dir.as_ref() else {
        return index_not_found();
    };

    match tokio::fs::read(dir.join(INDEX_FILE)).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            bytes,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => index_not_found(),
        Err(e) => {
            error!(error = %e, "Failed to read index");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Failed to read index" })),
            )
                .into_response()
        }
    }
}

fn index_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Index not found" })),
    )
        .into_response()
}
