//! OptiCode backend — entry point.
//!
//! Startup sequence:
//! 1. Init logging, load config (`.env` + environment)
//! 2. Probe scorer and providers (never fatal)
//! 3. Serve HTTP until Ctrl+C / SIGTERM
//! 4. Run the teardown hook

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{debug, info};

use opticode_core::config::load_config;
use opticode_server::{app, lifecycle, logging};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let config = load_config();
    debug!(config = %serde_json::to_string(&config)?, "Configuration loaded");

    let state = lifecycle::startup(&config);
    let router = app::build_http_app(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "OptiCode backend listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    lifecycle::shutdown();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
