use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::ServerState;
use service::db::comment_service::{
    self, Attachment, CommentUpdate, CreatedComment, VoteAction,
};
use service::guard;

#[derive(Debug, Deserialize)]
pub struct CreateCommentInput {
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub parent_comment_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentInput {
    pub user_id: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteCommentInput {
    pub user_id: String,
}

/// Vote action in either form: `?actions=up_vote` or the legacy
/// `?up_vote=1` / `?down_vote=-1` pair.
#[derive(Debug, Default, Deserialize)]
pub struct VoteQuery {
    pub actions: Option<String>,
    pub up_vote: Option<String>,
    pub down_vote: Option<String>,
}

impl VoteQuery {
    pub fn resolve(&self) -> Result<Option<VoteAction>, ApiError> {
        Ok(VoteAction::from_query(
            self.actions.as_deref(),
            self.up_vote.as_deref(),
            self.down_vote.as_deref(),
        )?)
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Path(project_id): Path<i32>,
    Json(input): Json<CreateCommentInput>,
) -> Result<(StatusCode, Json<CreatedComment>), ApiError> {
    guard::project_exists(&state.db, project_id).await?;
    guard::user_exists(&state.db, &input.user_id).await?;
    let created = comment_service::create_comment(
        &state.db,
        Attachment::Project(project_id),
        &input.user_id,
        &input.content,
        input.parent_comment_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(project_id): Path<i32>,
) -> Result<Json<Vec<models::comment::Model>>, ApiError> {
    guard::project_exists(&state.db, project_id).await?;
    Ok(Json(
        comment_service::list_comments(&state.db, Attachment::Project(project_id)).await?,
    ))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((project_id, comment_id)): Path<(i32, i32)>,
) -> Result<Json<models::comment::Model>, ApiError> {
    guard::project_exists(&state.db, project_id).await?;
    Ok(Json(
        comment_service::get_comment(&state.db, Attachment::Project(project_id), comment_id).await?,
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    Path((project_id, comment_id)): Path<(i32, i32)>,
    Query(vote): Query<VoteQuery>,
    Json(input): Json<UpdateCommentInput>,
) -> Result<Json<models::comment::Model>, ApiError> {
    guard::project_exists(&state.db, project_id).await?;
    guard::user_exists(&state.db, &input.user_id).await?;
    let update = CommentUpdate { content: input.content, action: vote.resolve()? };
    Ok(Json(
        comment_service::update_comment(
            &state.db,
            Attachment::Project(project_id),
            comment_id,
            &input.user_id,
            update,
        )
        .await?,
    ))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path((project_id, comment_id)): Path<(i32, i32)>,
    Json(input): Json<DeleteCommentInput>,
) -> Result<StatusCode, ApiError> {
    guard::project_exists(&state.db, project_id).await?;
    guard::user_exists(&state.db, &input.user_id).await?;
    comment_service::delete_comment(
        &state.db,
        Attachment::Project(project_id),
        comment_id,
        &input.user_id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
