pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

use axum::{http::StatusCode, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use store::PgShowStore;

// Shared state for every handler
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub shows: PgShowStore,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> Result<Arc<Self>, sqlx::Error> {
        let db = database::Database::new(&config.database.url, config.database.pool_size).await?;
        Ok(Self::with_database(db, config))
    }

    /// State over a pool that has not connected yet.
    pub fn lazy(config: config::Config) -> Result<Arc<Self>, sqlx::Error> {
        let db = database::Database::lazy(&config.database.url, config.database.pool_size)?;
        Ok(Self::with_database(db, config))
    }

    fn with_database(db: database::Database, config: config::Config) -> Arc<Self> {
        let shows = PgShowStore::new(db.pool.clone());
        Arc::new(Self { db, shows, config })
    }
}

async fn ready(axum::extract::State(state): axum::extract::State<Arc<AppState>>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("readiness check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Show Admin API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .route("/ready", get(ready))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
