//! Existence/ownership guards shared by every mutating operation.
//!
//! Guards are read-only lookups evaluated in a fixed order, short-circuiting
//! on the first failure. Later checks assume the earlier ones passed (no
//! point checking comment ownership if the comment does not exist).

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::errors::ServiceError;
use models::{comment, connection, issue, project, user};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

/// The project must exist, regardless of who owns it.
pub async fn project_exists(db: &DatabaseConnection, project_id: i32) -> Result<project::Model, ServiceError> {
    project::Entity::find_by_id(project_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("project"))
}

/// The project must exist and belong to `owner_id`. A project owned by
/// someone else is indistinguishable from a missing one.
pub async fn project_owned(
    db: &DatabaseConnection,
    project_id: i32,
    owner_id: &str,
) -> Result<project::Model, ServiceError> {
    project::Entity::find()
        .filter(project::Column::ProjectId.eq(project_id))
        .filter(project::Column::OwnerId.eq(owner_id))
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("project"))
}

pub async fn user_exists(db: &DatabaseConnection, user_id: &str) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("user"))
}

pub async fn comment_exists(db: &DatabaseConnection, comment_id: i32) -> Result<comment::Model, ServiceError> {
    comment::Entity::find_by_id(comment_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("comment"))
}

/// The issue must exist inside the given project.
pub async fn issue_in_project(
    db: &DatabaseConnection,
    project_id: i32,
    issue_id: i32,
) -> Result<issue::Model, ServiceError> {
    issue::Entity::find()
        .filter(issue::Column::IssueId.eq(issue_id))
        .filter(issue::Column::ProjectId.eq(project_id))
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("issue"))
}

pub async fn connection_exists(
    db: &DatabaseConnection,
    connection_id: i32,
) -> Result<connection::Model, ServiceError> {
    connection::Entity::find_by_id(connection_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("connection"))
}

/// Content edits and deletes are gated on comment ownership. Vote-only and
/// read access never go through this check.
pub fn comment_owned(comment: &comment::Model, user_id: &str) -> Result<(), ServiceError> {
    if comment.user_id.as_deref() == Some(user_id) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized("you are not the owner of the comment".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comment_by(user_id: Option<&str>) -> comment::Model {
        let now = Utc::now().into();
        comment::Model {
            comment_id: 1,
            user_id: user_id.map(str::to_string),
            content: "hello".into(),
            up_votes: 0,
            down_votes: 0,
            last_modified: now,
            created_at: now,
        }
    }

    #[test]
    fn owner_passes_ownership_check() {
        assert!(comment_owned(&comment_by(Some("u1")), "u1").is_ok());
    }

    #[test]
    fn non_owner_is_unauthorized() {
        let err = comment_owned(&comment_by(Some("u1")), "u2").unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[test]
    fn authorless_comment_is_never_owned() {
        let err = comment_owned(&comment_by(None), "u1").unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }
}
