use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::ApiError;
use crate::routes::ServerState;
use service::db::project_service::{self, NewProject, ProjectPatch};

pub async fn create(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    Json(input): Json<NewProject>,
) -> Result<Json<models::project::Model>, ApiError> {
    let created = project_service::create_project(&state.db, &user_id, input).await?;
    info!(project_id = created.project_id, owner = %user_id, "project created");
    Ok(Json(created))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<models::project::Model>>, ApiError> {
    Ok(Json(project_service::list_user_projects(&state.db, &user_id).await?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((user_id, project_id)): Path<(String, i32)>,
) -> Result<Json<models::project::Model>, ApiError> {
    Ok(Json(project_service::get_project(&state.db, &user_id, project_id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path((user_id, project_id)): Path<(String, i32)>,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<models::project::Model>, ApiError> {
    Ok(Json(project_service::update_project(&state.db, &user_id, project_id, patch).await?))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path((user_id, project_id)): Path<(String, i32)>,
) -> Result<StatusCode, ApiError> {
    if project_service::delete_project(&state.db, &user_id, project_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("project not found"))
    }
}
