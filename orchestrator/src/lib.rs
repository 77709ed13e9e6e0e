//! Scratchpad orchestrator library
//!
//! Folder-backed code containers: create a container, fill it with files, and
//! run one of them with the configured runtime.

pub mod api;
pub mod config;
pub mod container;
pub mod logging;
pub mod models;

/// Application state shared across all handlers
pub struct AppState {
    pub container_manager: container::ContainerManager,
}
