//! Scratchpad orchestrator - folder-backed code containers over HTTP
//!
//! This is the main entry point for the orchestrator service. It manages
//! container directories and runs container files with the configured runtime.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderName;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use scratchpad_orchestrator::api::create_router;
use scratchpad_orchestrator::config::AppConfig;
use scratchpad_orchestrator::container::{ContainerManager, SystemExecutor};
use scratchpad_orchestrator::logging::init_logging;
use scratchpad_orchestrator::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    init_logging(&config.log_level, config.log_dir.as_deref())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Scratchpad orchestrator"
    );

    // A missing runtime only breaks execution, not file management
    match which::which(&config.runtime.program) {
        Ok(path) => info!(runtime = %path.display(), "Runtime found"),
        Err(_) => warn!(
            runtime = %config.runtime.program,
            "Runtime not found in PATH, executions will fail"
        ),
    }

    if config.execution.timeout().is_none() {
        warn!("Execution timeout disabled, a file that never exits will hang its request");
    }

    // Initialize container manager
    let container_manager = ContainerManager::new(
        config.data_dir.clone(),
        config.runtime.clone(),
        config.execution.clone(),
        Arc::new(SystemExecutor::new()),
    )
    .await
    .context("Failed to initialize container manager")?;

    // Create shared application state
    let state = Arc::new(AppState { container_manager });

    // Build the router with all routes and middleware
    let x_request_id = HeaderName::from_static("x-request-id");
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(x_request_id))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(%addr, "Listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Scratchpad orchestrator stopped");
    Ok(())
}

/// Handle shutdown signals gracefully
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutting down...");
}
