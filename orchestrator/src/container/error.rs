//! Error types for container and execution operations

use std::path::PathBuf;
use std::string::FromUtf8Error;
use std::time::Duration;

use thiserror::Error;

use crate::models::ExecutionOutput;

/// Coarse classification used by callers to pick a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Storage,
    Decode,
    Execution,
}

/// Errors raised by [`ContainerManager`](super::ContainerManager)
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid file name {name:?}: {reason}")]
    InvalidFileName { name: String, reason: &'static str },

    #[error("Failed to {action} {}: {source}", .path.display())]
    Storage {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {file_name} is not valid UTF-8 text")]
    Decode {
        file_name: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Errors raised while running a process
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for process: {0}")]
    Wait(#[source] std::io::Error),

    #[error("Process exited with {}", describe_exit(.output.exit_code))]
    NonZeroExit { output: ExecutionOutput },

    #[error("Execution timed out after {} seconds", .after.as_secs())]
    Timeout { after: Duration },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl ContainerError {
    pub(crate) fn storage(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        ContainerError::Storage {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_name(name: &str, reason: &'static str) -> Self {
        ContainerError::InvalidFileName {
            name: name.to_string(),
            reason,
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContainerError::ContainerNotFound(_) | ContainerError::FileNotFound(_) => {
                ErrorKind::NotFound
            }
            ContainerError::InvalidFileName { .. } => ErrorKind::Validation,
            ContainerError::Storage { .. } => ErrorKind::Storage,
            ContainerError::Decode { .. } => ErrorKind::Decode,
            ContainerError::Execution(_) => ErrorKind::Execution,
        }
    }
}

pub type Result<T> = std::result::Result<T, ContainerError>;
