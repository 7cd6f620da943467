use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::ServerState;
use service::db::deployment_service;

#[derive(Debug, Deserialize)]
pub struct CreateDeploymentInput {
    pub user_id: String,
    pub connection_id: i32,
    #[serde(default)]
    pub version: Option<String>,
}

pub async fn create(
    State(state): State<ServerState>,
    Path(project_id): Path<i32>,
    Json(input): Json<CreateDeploymentInput>,
) -> Result<Json<models::deployment::Model>, ApiError> {
    Ok(Json(
        deployment_service::create_deployment(
            &state.db,
            project_id,
            &input.user_id,
            input.connection_id,
            input.version,
        )
        .await?,
    ))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(project_id): Path<i32>,
) -> Result<Json<Vec<models::deployment::Model>>, ApiError> {
    Ok(Json(deployment_service::list_project_deployments(&state.db, project_id).await?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((project_id, deployment_id)): Path<(i32, i32)>,
) -> Result<Json<models::deployment::Model>, ApiError> {
    Ok(Json(deployment_service::get_deployment(&state.db, project_id, deployment_id).await?))
}

pub async fn cancel(
    State(state): State<ServerState>,
    Path((project_id, deployment_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    if deployment_service::cancel_deployment(&state.db, project_id, deployment_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("deployment not found"))
    }
}

pub async fn remove(
    State(state): State<ServerState>,
    Path((project_id, deployment_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    if deployment_service::delete_deployment(&state.db, project_id, deployment_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("deployment not found"))
    }
}
