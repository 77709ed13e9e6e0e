//! Data models for the Scratchpad orchestrator
//!
//! This module defines all request/response types shared by the container
//! manager, the HTTP API and the CLI.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ============================================================================
// Container Models
// ============================================================================

/// A freshly created container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedContainer {
    pub container_id: String,
    pub folder_path: PathBuf,
}

/// Contents of a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub container_id: String,
    pub folder_path: PathBuf,
    /// Entry names in directory order; callers must not rely on the order
    pub files: Vec<String>,
}

// ============================================================================
// File Models
// ============================================================================

/// Request to create an empty file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRequest {
    pub file_name: String,
}

/// Request to replace a file's content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFileRequest {
    #[serde(default)]
    pub content: String,
}

/// A file read back as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub folder_path: PathBuf,
    pub file_name: String,
    pub content: String,
}

// ============================================================================
// Execution Models
// ============================================================================

/// Captured result of running a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutput {
    /// Standard output
    #[serde(default)]
    pub stdout: String,

    /// Standard error
    #[serde(default)]
    pub stderr: String,

    /// Process exit code, absent when killed by a signal
    #[serde(default)]
    pub exit_code: Option<i32>,

    /// Wall-clock duration in milliseconds
    #[serde(default)]
    pub duration_ms: u64,
}

impl ExecutionOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

// ============================================================================
// Service Models
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub container_count: u64,
    #[serde(default)]
    pub runtime_version: Option<String>,
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
