use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::comments::{
    CreateCommentInput, DeleteCommentInput, UpdateCommentInput, VoteQuery,
};
use crate::routes::ServerState;
use service::db::comment_service::{self, Attachment, CommentUpdate, CreatedComment};
use service::db::issue_service::{self, IssuePatch};
use service::guard;

#[derive(Debug, Deserialize)]
pub struct CreateIssueInput {
    pub user_id: String,
    pub title: String,
    pub description: String,
}

pub async fn create(
    State(state): State<ServerState>,
    Path(project_id): Path<i32>,
    Json(input): Json<CreateIssueInput>,
) -> Result<(StatusCode, Json<models::issue::Model>), ApiError> {
    let created =
        issue_service::create_issue(&state.db, project_id, &input.user_id, &input.title, &input.description)
            .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(project_id): Path<i32>,
) -> Result<Json<Vec<models::issue::Model>>, ApiError> {
    Ok(Json(issue_service::list_project_issues(&state.db, project_id).await?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((project_id, issue_id)): Path<(i32, i32)>,
) -> Result<Json<models::issue::Model>, ApiError> {
    Ok(Json(issue_service::get_issue(&state.db, project_id, issue_id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Path((project_id, issue_id)): Path<(i32, i32)>,
    Json(patch): Json<IssuePatch>,
) -> Result<Json<models::issue::Model>, ApiError> {
    Ok(Json(issue_service::update_issue(&state.db, project_id, issue_id, patch).await?))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path((project_id, issue_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    if issue_service::delete_issue(&state.db, project_id, issue_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("issue not found"))
    }
}

// Issue comments run through the same engine as project comments, with the
// issue join table selected by the attachment.

pub async fn create_comment(
    State(state): State<ServerState>,
    Path((project_id, issue_id)): Path<(i32, i32)>,
    Json(input): Json<CreateCommentInput>,
) -> Result<(StatusCode, Json<CreatedComment>), ApiError> {
    guard::project_exists(&state.db, project_id).await?;
    guard::issue_in_project(&state.db, project_id, issue_id).await?;
    guard::user_exists(&state.db, &input.user_id).await?;
    let created = comment_service::create_comment(
        &state.db,
        Attachment::Issue(issue_id),
        &input.user_id,
        &input.content,
        input.parent_comment_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_comments(
    State(state): State<ServerState>,
    Path((project_id, issue_id)): Path<(i32, i32)>,
) -> Result<Json<Vec<models::comment::Model>>, ApiError> {
    guard::project_exists(&state.db, project_id).await?;
    guard::issue_in_project(&state.db, project_id, issue_id).await?;
    Ok(Json(comment_service::list_comments(&state.db, Attachment::Issue(issue_id)).await?))
}

pub async fn update_comment(
    State(state): State<ServerState>,
    Path((project_id, issue_id, comment_id)): Path<(i32, i32, i32)>,
    Query(vote): Query<VoteQuery>,
    Json(input): Json<UpdateCommentInput>,
) -> Result<Json<models::comment::Model>, ApiError> {
    guard::project_exists(&state.db, project_id).await?;
    guard::issue_in_project(&state.db, project_id, issue_id).await?;
    guard::user_exists(&state.db, &input.user_id).await?;
    let update = CommentUpdate { content: input.content, action: vote.resolve()? };
    Ok(Json(
        comment_service::update_comment(
            &state.db,
            Attachment::Issue(issue_id),
            comment_id,
            &input.user_id,
            update,
        )
        .await?,
    ))
}

pub async fn remove_comment(
    State(state): State<ServerState>,
    Path((project_id, issue_id, comment_id)): Path<(i32, i32, i32)>,
    Json(input): Json<DeleteCommentInput>,
) -> Result<StatusCode, ApiError> {
    guard::project_exists(&state.db, project_id).await?;
    guard::issue_in_project(&state.db, project_id, issue_id).await?;
    guard::user_exists(&state.db, &input.user_id).await?;
    comment_service::delete_comment(&state.db, Attachment::Issue(issue_id), comment_id, &input.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
