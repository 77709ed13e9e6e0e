//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::container::{ContainerError, ErrorKind, ExecutionError};
use crate::models::{ErrorResponse, ExecutionOutput};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Execution timeout")]
    Timeout,

    #[error("Execution failed: {message}")]
    Execution {
        message: String,
        output: Option<ExecutionOutput>,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "EXECUTION_TIMEOUT",
                self.to_string(),
            ),
            ApiError::Execution { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "EXECUTION_FAILED",
                message.clone(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let mut body = ErrorResponse::new(error_code, message);
        if let ApiError::Execution {
            output: Some(output),
            ..
        } = &self
        {
            if let Ok(details) = serde_json::to_value(output) {
                body = body.with_details(details);
            }
        }

        (status, Json(body)).into_response()
    }
}

impl From<ContainerError> for ApiError {
    fn from(err: ContainerError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => ApiError::NotFound(err.to_string()),
            ErrorKind::Validation => ApiError::BadRequest(err.to_string()),
            ErrorKind::Storage | ErrorKind::Decode => {
                tracing::error!(error = %err, "Container operation failed");
                ApiError::Internal(err.to_string())
            }
            ErrorKind::Execution => {
                let message = err.to_string();
                match err {
                    ContainerError::Execution(ExecutionError::Timeout { .. }) => ApiError::Timeout,
                    ContainerError::Execution(ExecutionError::NonZeroExit { output }) => {
                        ApiError::Execution {
                            message,
                            output: Some(output),
                        }
                    }
                    _ => {
                        tracing::error!(error = %message, "Execution could not start");
                        ApiError::Execution {
                            message,
                            output: None,
                        }
                    }
                }
            }
        }
    }
}
