use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::ApiError;
use crate::routes::ServerState;
use service::db::connection_service::{self, ConnectionPatch, NewConnection};

pub async fn create(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    Json(input): Json<NewConnection>,
) -> Result<(StatusCode, Json<models::connection::Model>), ApiError> {
    let created = connection_service::create_connection(&state.db, &user_id, input).await?;
    info!(connection_id = created.connection_id, user = %user_id, "connection created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<models::connection::Model>>, ApiError> {
    Ok(Json(connection_service::list_user_connections(&state.db, &user_id).await?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((user_id, connection_id)): Path<(String, i32)>,
) -> Result<Json<models::connection::Model>, ApiError> {
    Ok(Json(connection_service::get_connection(&state.db, &user_id, connection_id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path((user_id, connection_id)): Path<(String, i32)>,
    Json(patch): Json<ConnectionPatch>,
) -> Result<Json<models::connection::Model>, ApiError> {
    Ok(Json(
        connection_service::update_connection(&state.db, &user_id, connection_id, patch).await?,
    ))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path((user_id, connection_id)): Path<(String, i32)>,
) -> Result<StatusCode, ApiError> {
    if connection_service::delete_connection(&state.db, &user_id, connection_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("connection not found"))
    }
}
