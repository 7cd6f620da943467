use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;

use crate::errors::ServiceError;
use crate::guard;
use models::issue;

/// Fields an issue update may change. Setting `status` to `closed` stamps
/// `closed_at`; any other status clears it.
#[derive(Debug, Default, Deserialize)]
pub struct IssuePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// New issues always start out `open`.
pub async fn create_issue(
    db: &DatabaseConnection,
    project_id: i32,
    user_id: &str,
    title: &str,
    description: &str,
) -> Result<issue::Model, ServiceError> {
    guard::project_exists(db, project_id).await?;
    guard::user_exists(db, user_id).await?;
    issue::validate_title(title)?;

    let now = Utc::now().into();
    issue::ActiveModel {
        project_id: Set(project_id),
        user_id: Set(Some(user_id.to_string())),
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        status: Set(Some(issue::STATUS_OPEN.to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_project_issues(
    db: &DatabaseConnection,
    project_id: i32,
) -> Result<Vec<issue::Model>, ServiceError> {
    guard::project_exists(db, project_id).await?;
    issue::Entity::find()
        .filter(issue::Column::ProjectId.eq(project_id))
        .order_by_asc(issue::Column::IssueId)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_issue(
    db: &DatabaseConnection,
    project_id: i32,
    issue_id: i32,
) -> Result<issue::Model, ServiceError> {
    guard::project_exists(db, project_id).await?;
    guard::issue_in_project(db, project_id, issue_id).await
}

pub async fn update_issue(
    db: &DatabaseConnection,
    project_id: i32,
    issue_id: i32,
    patch: IssuePatch,
) -> Result<issue::Model, ServiceError> {
    guard::project_exists(db, project_id).await?;
    let existing = guard::issue_in_project(db, project_id, issue_id).await?;
    let mut am: issue::ActiveModel = existing.into();
    if let Some(title) = patch.title {
        issue::validate_title(&title)?;
        am.title = Set(title);
    }
    if let Some(description) = patch.description {
        am.description = Set(description);
    }
    if let Some(status) = patch.status {
        // closed_at tracks only the transition into `closed`
        if status == issue::STATUS_CLOSED {
            am.closed_at = Set(Some(Utc::now().into()));
        } else {
            am.closed_at = Set(None);
        }
        am.status = Set(Some(status));
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Returns false when the issue does not exist in this project. Attached
/// comments disappear through the join-table cascade.
pub async fn delete_issue(
    db: &DatabaseConnection,
    project_id: i32,
    issue_id: i32,
) -> Result<bool, ServiceError> {
    guard::project_exists(db, project_id).await?;
    let res = issue::Entity::delete_many()
        .filter(issue::Column::IssueId.eq(issue_id))
        .filter(issue::Column::ProjectId.eq(project_id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use uuid::Uuid;

    async fn seed(db: &sea_orm::DatabaseConnection) -> (String, i32) {
        let uid = format!("svc_issue_user_{}", Uuid::new_v4());
        models::user::create(db, &uid, &format!("u_{}", uid), "Issue Tester", &format!("{}@test.com", uid), None, None)
            .await
            .expect("create user");
        let now = Utc::now().into();
        let p = models::project::ActiveModel {
            owner_id: Set(uid.clone()),
            name: Set("issue target".into()),
            visibility: Set(models::project::VISIBILITY_PUBLIC.into()),
            created_at: Set(now),
            last_updated: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("create project");
        (uid, p.project_id)
    }

    #[tokio::test]
    async fn issue_lifecycle_with_closed_at() {
        let Some(db) = get_db().await else { return };
        let (uid, pid) = seed(&db).await;

        let created = create_issue(&db, pid, &uid, "broken deploy", "pipeline fails at step 3")
            .await
            .expect("create");
        assert_eq!(created.status.as_deref(), Some("open"));
        assert!(created.closed_at.is_none());

        let patch = IssuePatch { status: Some("closed".into()), ..Default::default() };
        let closed = update_issue(&db, pid, created.issue_id, patch).await.expect("close");
        assert!(closed.closed_at.is_some());

        // Reopening clears the close timestamp
        let patch = IssuePatch { status: Some("open".into()), ..Default::default() };
        let reopened = update_issue(&db, pid, created.issue_id, patch).await.expect("reopen");
        assert!(reopened.closed_at.is_none());

        assert!(delete_issue(&db, pid, created.issue_id).await.expect("delete"));
        assert!(!delete_issue(&db, pid, created.issue_id).await.expect("gone"));

        models::user::Entity::delete_by_id(uid).exec(&db).await.expect("cleanup");
    }

    #[tokio::test]
    async fn issue_requires_existing_project() {
        let Some(db) = get_db().await else { return };
        let err = create_issue(&db, 0, "whoever", "t", "d").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
