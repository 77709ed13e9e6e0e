//! File management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::ApiError;
use crate::models::{CreateFileRequest, ExecutionOutput, FileContent, SaveFileRequest};
use crate::AppState;

/// Path parameters addressing one file
#[derive(Debug, Deserialize)]
pub struct FilePath {
    pub container_id: String,
    pub file_name: String,
}

/// Create an empty file
pub async fn create_file(
    State(state): State<Arc<AppState>>,
    Path(container_id): Path<String>,
    Json(request): Json<CreateFileRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .container_manager
        .create_file(&container_id, &request.file_name)
        .await?;

    Ok(StatusCode::CREATED)
}

/// Read a file
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(path): Path<FilePath>,
) -> Result<Json<FileContent>, ApiError> {
    let file = state
        .container_manager
        .get_file(&path.container_id, &path.file_name)
        .await?;

    Ok(Json(file))
}

/// Replace a file's content
pub async fn save_file(
    State(state): State<Arc<AppState>>,
    Path(path): Path<FilePath>,
    Json(request): Json<SaveFileRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .container_manager
        .write_file(&path.container_id, &path.file_name, &request.content)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Run a file and return its output
pub async fn execute_file(
    State(state): State<Arc<AppState>>,
    Path(path): Path<FilePath>,
) -> Result<Json<ExecutionOutput>, ApiError> {
    let output = state
        .container_manager
        .execute_file(&path.container_id, &path.file_name)
        .await?;

    Ok(Json(output))
}
