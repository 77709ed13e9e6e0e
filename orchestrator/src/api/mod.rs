//! API module for the Scratchpad orchestrator
//!
//! Provides REST API endpoints for:
//! - Container creation and listing
//! - File creation, reading and saving
//! - File execution
//! - Health checks

mod error;
mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use error::ApiError;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Uptime counts from router construction, not from the first health request
    handlers::health::mark_started();

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Legacy route shapes
        .route("/container", get(handlers::containers::create_container))
        .nest("/container/:container_id", container_routes())
        // API v1 routes
        .nest("/api/v1", api_v1_routes())
        .with_state(state)
}

/// API v1 routes
fn api_v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/containers", post(handlers::containers::create_container))
        .nest("/containers/:container_id", container_routes())
}

/// Routes scoped to one container
fn container_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/files",
            get(handlers::containers::get_container_info).post(handlers::files::create_file),
        )
        .route(
            "/files/:file_name",
            get(handlers::files::get_file).put(handlers::files::save_file),
        )
        .route(
            "/files/:file_name/run",
            get(handlers::files::execute_file).post(handlers::files::execute_file),
        )
}
