#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use opticode_providers::{CompletionProvider, ProviderError, SecurityScorer};
use opticode_server::app;
use opticode_server::state::{AppState, Capability};
use serde_json::Value;
use tower::util::ServiceExt;

/// Completion stub: returns a fixed reply, or fails when `reply` is `None`.
pub struct StubProvider {
    pub name: &'static str,
    pub reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
    pub calls: AtomicUsize,
}

impl StubProvider {
    pub fn replying(name: &'static str, reply: &str) -> Arc<Self> {
        Arc::new(Self {
            name,
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            reply: None,
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().expect("lock").last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().expect("lock").push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| ProviderError::Decode(format!("{} is down", self.name)))
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    fn display_name(&self) -> &str {
        self.name
    }
}

/// Scorer stub: returns a fixed label, or fails when `label` is `None`.
pub struct StubScorer {
    pub label: Option<&'static str>,
}

#[async_trait]
impl SecurityScorer for StubScorer {
    async fn classify(&self, _snippet: &str) -> Result<String, ProviderError> {
        self.label
            .map(str::to_string)
            .ok_or_else(|| ProviderError::Decode("classifier offline".into()))
    }

    fn model(&self) -> &str {
        "stub-classifier"
    }
}

pub fn with_gemini(provider: Arc<StubProvider>) -> AppState {
    let mut state = AppState::empty();
    state.gemini = Capability::Present(provider);
    state
}

pub fn with_scorer(mut state: AppState, label: Option<&'static str>) -> AppState {
    state.scorer = Capability::Present(Arc::new(StubScorer { label }));
    state
}

pub fn build_app(state: AppState) -> axum::Router {
    app::build_http_app(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub content_type: Option<String>,
    pub trace_id: Option<String>,
}

async fn send(app: &axum::Router, req: Request<Body>) -> TestResponse {
    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("request should be handled");

    let status = resp.status();
    let (content_type, trace_id) = {
        let header = |name: &str| {
            resp.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string())
        };
        (header("content-type"), header("x-trace-id"))
    };

    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };

    TestResponse {
        status,
        body,
        content_type,
        trace_id,
    }
}

pub async fn post_json(app: &axum::Router, uri: &str, body: Value) -> TestResponse {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    send(app, req).await
}

pub async fn get(app: &axum::Router, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(app, req).await
}
