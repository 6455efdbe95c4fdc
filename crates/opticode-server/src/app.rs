use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::{api, logging};

/// Build the HTTP router.
///
/// `/analyze` accepts bodies of any size. `/static/*` is only mounted when the
/// frontend directory exists.
pub fn build_http_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route(
            "/analyze",
            post(api::analyze_code).layer(DefaultBodyLimit::disable()),
        )
        .route("/health", get(api::health))
        .route("/", get(api::serve_index));

    if let Some(dir) = state.static_dir.clone() {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(logging::request_logging))
}
