use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::ApiError;
use crate::routes::ServerState;
use service::db::user_service::{self, UserPatch};

#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub user_id: String,
    pub username: String,
    pub fullname: String,
    pub email: String,
    #[serde(default)]
    pub profile_img_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<models::user::Model>), ApiError> {
    let created = user_service::create_user(
        &state.db,
        &input.user_id,
        &input.username,
        &input.fullname,
        &input.email,
        input.profile_img_url,
        input.bio,
    )
    .await?;
    info!(user_id = %created.user_id, "user created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::user::Model>>, ApiError> {
    Ok(Json(user_service::list_users(&state.db).await?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<models::user::Model>, ApiError> {
    Ok(Json(user_service::get_user(&state.db, &user_id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<models::user::Model>, ApiError> {
    Ok(Json(user_service::update_user(&state.db, &user_id, patch).await?))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if user_service::delete_user(&state.db, &user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("user not found"))
    }
}
