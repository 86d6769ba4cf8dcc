//! HTTP server for the film browser.
//!
//! Serves the loaded film catalog (filtering, genre facets, director
//! drill-down) and the per-title streaming lookup as a JSON API.

pub mod routes;
pub mod state;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

pub use routes::{router, ApiError, FilmRow, FilmsParams, StreamingResponse};
pub use state::{AppState, StateConfig};

/// Default listen address
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Bind `addr` and serve until Ctrl+C
pub async fn run(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Film finder listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
