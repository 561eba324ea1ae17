//! Application setup and initialization
//!
//! All initialization logic lives here rather than in main.rs, so tests can
//! wire the same pieces with their own store and directories.

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use filedrop_core::{Config, StoreBackend};
use filedrop_db::{InMemoryUploadStore, PgUploadStore, UploadStore};

use crate::services::lifecycle::UploadLifecycle;
use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_tracing();

    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;
    tracing::info!("Configuration loaded and validated successfully");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload directory {}", config.upload_dir.display()))?;
    tokio::fs::create_dir_all(&config.staging_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create staging directory {}",
                config.staging_dir.display()
            )
        })?;

    let store: Arc<dyn UploadStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let pool = database::setup_database(&config).await?;
            Arc::new(PgUploadStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory upload store; records will not survive a restart");
            Arc::new(InMemoryUploadStore::new())
        }
    };

    let lifecycle = UploadLifecycle::new(store.clone(), config.upload_dir.clone());
    let state = Arc::new(AppState {
        config,
        store,
        lifecycle,
    });

    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
