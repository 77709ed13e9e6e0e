//! Container handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::ApiError;
use crate::models::{ContainerInfo, CreatedContainer};
use crate::AppState;

/// Create a new container
pub async fn create_container(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<CreatedContainer>), ApiError> {
    let created = state.container_manager.create_container().await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List the files of a container
pub async fn get_container_info(
    State(state): State<Arc<AppState>>,
    Path(container_id): Path<String>,
) -> Result<Json<ContainerInfo>, ApiError> {
    let info = state
        .container_manager
        .get_container_info(&container_id)
        .await?;

    Ok(Json(info))
}
