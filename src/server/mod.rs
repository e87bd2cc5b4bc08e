// src/server/mod.rs
//! HTTP server for the recipe catalog
//!
//! This module maps the loader and query service onto HTTP:
//! - Paginated listing ordered by rating
//! - Filtered search
//! - On-demand loading of the recipe document
//!
//! Each request opens its own SQLite connection inside `spawn_blocking`;
//! there is no shared in-process cache.

mod handlers;
mod routes;

pub use handlers::recipes::{ListParams, LoadResponse, SearchParams};
pub use routes::create_router;

use crate::db;
use crate::error::Result;
use crate::loader::{LoadOutcome, Loader, LoaderConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Path to the recipe database
    pub db_path: PathBuf,
    /// Startup and on-demand ingestion settings
    pub loader: LoaderConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: PathBuf::from("recipes.db"),
            loader: LoaderConfig::default(),
        }
    }
}

/// Shared server state
pub struct ServerState {
    pub config: ServerConfig,
    pub loader: Loader,
    /// Serializes on-demand loads so only one check-then-insert runs at a time
    load_lock: Mutex<()>,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        let loader = Loader::new(config.loader.clone());
        Self {
            config,
            loader,
            load_lock: Mutex::new(()),
        }
    }

    /// Open a database connection
    ///
    /// This should be called from within `spawn_blocking` for async handlers.
    pub fn open_db(&self) -> Result<rusqlite::Connection> {
        db::open(&self.config.db_path)
    }

    /// Run the loader on a blocking thread, one load at a time
    pub async fn load(self: Arc<Self>) -> Result<LoadOutcome> {
        let _guard = self.load_lock.lock().await;
        let state = Arc::clone(&self);

        tokio::task::spawn_blocking(move || {
            let mut conn = state.open_db()?;
            state.loader.load_if_needed(&mut conn)
        })
        .await?
    }
}

/// Startup hook: load the document if the store is empty
///
/// Failures are logged and swallowed so the server still starts, serving
/// whatever the store holds (possibly nothing).
pub async fn run_startup_load(state: &Arc<ServerState>) {
    tracing::info!("=== Starting recipe data loader ===");

    match Arc::clone(state).load().await {
        Ok(outcome) => {
            tracing::info!(
                "=== Data loader completed: {} (processed {}, skipped {}, saved {}) ===",
                outcome.status.as_str(),
                outcome.processed,
                outcome.skipped,
                outcome.saved
            );
        }
        Err(e) => {
            tracing::error!("=== Data loader failed: {} ===", e);
            tracing::info!("Application will continue without initial data load");
        }
    }
}

/// Start the recipe server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting recipe server on {}", config.bind_addr);
    tracing::info!("Database: {:?}", config.db_path);
    tracing::info!(
        "Startup load: {} (source: {})",
        if config.loader.enabled { "enabled" } else { "disabled" },
        config.loader.source
    );

    let db_path = config.db_path.clone();
    tokio::task::spawn_blocking(move || db::init(&db_path)).await??;

    let state = Arc::new(ServerState::new(config.clone()));
    run_startup_load(&state).await;

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Recipe server is ready to serve");

    axum::serve(listener, app).await?;
    Ok(())
}
