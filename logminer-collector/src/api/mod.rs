//! API Module
//!
//! HTTP API layer for the collector.
//! Each submodule handles endpoints for a specific domain.

pub mod error;
pub mod health;
pub mod log;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::repository::LogStore;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LogStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self { store }
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Log endpoints
        .route("/logs/upload", post(log::upload_log))
        .route("/logs/github", get(log::fetch_github_logs))
        // Add state and middleware
        .with_state(state)
        // CI logs have no size bound
        .layer(DefaultBodyLimit::disable())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
