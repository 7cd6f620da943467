//! File endpoints over the external blob store.
//!
//! The store integration is a stub: each handler validates the parent
//! project's blob reference and answers with a placeholder payload.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::routes::ServerState;
use service::db::file_service;

pub async fn create(
    State(state): State<ServerState>,
    Path(project_id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    file_service::ensure_project_blob(&state.db, project_id).await?;
    // Echo until the blob store can accept the upload
    Ok(Json(body))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(project_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    file_service::ensure_project_blob(&state.db, project_id).await?;
    Ok(Json(json!([{ "file": "main.tf" }])))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((project_id, file_id)): Path<(i32, String)>,
) -> Result<Json<Value>, ApiError> {
    file_service::ensure_project_blob(&state.db, project_id).await?;
    Ok(Json(json!([{ "file": file_id }])))
}

pub async fn update(
    State(state): State<ServerState>,
    Path((project_id, _file_id)): Path<(i32, String)>,
) -> Result<Json<Value>, ApiError> {
    file_service::ensure_project_blob(&state.db, project_id).await?;
    Ok(Json(json!({ "message": "File updated" })))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path((project_id, _file_id)): Path<(i32, String)>,
) -> Result<StatusCode, ApiError> {
    file_service::ensure_project_blob(&state.db, project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
