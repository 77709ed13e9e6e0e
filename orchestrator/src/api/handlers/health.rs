//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use once_cell::sync::Lazy;

use crate::models::{HealthResponse, HealthStatus};
use crate::AppState;

/// Server start time for uptime calculation
static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Pin the uptime clock to now unless it is already running
pub fn mark_started() {
    Lazy::force(&START_TIME);
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let uptime = START_TIME.elapsed().as_secs();
    let container_count = state.container_manager.container_count().await;
    let runtime_version = state.container_manager.runtime_version().await;

    let status = match (&container_count, &runtime_version) {
        (Err(_), _) => HealthStatus::Unhealthy,
        (Ok(_), None) => HealthStatus::Degraded,
        (Ok(_), Some(_)) => HealthStatus::Healthy,
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        container_count: container_count.unwrap_or(0),
        runtime_version,
    })
}
