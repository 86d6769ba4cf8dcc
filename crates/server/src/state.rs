//! # Application State
//!
//! Everything a request handler needs, shared behind cheap clones:
//! the film catalog (loaded once, read-only afterwards) and the
//! streaming resolver.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;

use data_loader::FilmCatalog;
use streaming::{ClientConfig, JustWatchClient, StreamingResolver};

/// Shared state handed to every Axum handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<FilmCatalog>,
    pub resolver: StreamingResolver,
}

/// Where the data and the external catalog live
#[derive(Debug, Clone)]
pub struct StateConfig {
    pub data_file: PathBuf,
    pub catalog_url: String,
    pub timeout: Duration,
}

impl AppState {
    pub fn new(catalog: Arc<FilmCatalog>, resolver: StreamingResolver) -> Self {
        Self { catalog, resolver }
    }

    /// Load the catalog and build a JustWatch-backed resolver
    ///
    /// Parsing runs on the blocking pool so the runtime stays responsive.
    pub async fn load(config: &StateConfig) -> Result<Self> {
        let start = Instant::now();
        let data_file = config.data_file.clone();
        let catalog = tokio::task::spawn_blocking(move || FilmCatalog::load(&data_file))
            .await
            .context("Catalog loading task panicked")?
            .with_context(|| format!("Failed to load films from {}", config.data_file.display()))?;
        info!(
            "Loaded {} films and {} genres in {:.2?}",
            catalog.len(),
            catalog.genre_tokens().len(),
            start.elapsed()
        );

        let client = JustWatchClient::new(ClientConfig {
            endpoint: config.catalog_url.clone(),
            timeout: config.timeout,
        })
        .context("Failed to build catalog client")?;
        info!("Streaming lookups go to {}", client.endpoint());

        Ok(Self::new(
            Arc::new(catalog),
            StreamingResolver::new(Arc::new(client)),
        ))
    }
}
