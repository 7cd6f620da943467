use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::ServerState;
use service::db::search_service;
use service::errors::ServiceError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

fn require_query(q: Option<String>) -> Result<String, ApiError> {
    match q {
        Some(q) if !q.trim().is_empty() => Ok(q),
        _ => Err(ServiceError::Validation("Missing search query".into()).into()),
    }
}

pub async fn projects(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<models::project::Model>>, ApiError> {
    let q = require_query(query.q)?;
    Ok(Json(search_service::search_projects(&state.db, &q).await?))
}

pub async fn users(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<models::user::Model>>, ApiError> {
    let q = require_query(query.q)?;
    Ok(Json(search_service::search_users(&state.db, &q).await?))
}
