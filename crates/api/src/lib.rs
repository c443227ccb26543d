//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The budget and author REST routes
//! - Mapping from domain errors to HTTP responses

pub mod error;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tally_shared::StatsConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Pagination bounds for yearly statistics.
    pub stats: StatsConfig,
}

impl AppState {
    /// Builds state around an open connection.
    #[must_use]
    pub fn new(db: DatabaseConnection, stats: StatsConfig) -> Self {
        Self {
            db: Arc::new(db),
            stats,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
