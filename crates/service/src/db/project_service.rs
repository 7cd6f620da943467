use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::guard;
use models::project;

#[derive(Debug, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub visibility: String,
    pub cloud_provider: Option<String>,
}

/// Fields a project update may change.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<String>,
    pub cloud_provider: Option<String>,
    pub estimated_cost: Option<f64>,
    pub availability: Option<f64>,
    pub durability: Option<f64>,
}

pub async fn create_project(
    db: &DatabaseConnection,
    owner_id: &str,
    input: NewProject,
) -> Result<project::Model, ServiceError> {
    guard::user_exists(db, owner_id).await?;
    project::validate_name(&input.name)?;
    project::validate_visibility(&input.visibility)?;

    // Placeholder reference until the blob store assigns a real location
    let blob_url = format!("blob:{}", Uuid::new_v4());
    let now = Utc::now().into();
    let created = project::ActiveModel {
        owner_id: Set(owner_id.to_string()),
        name: Set(input.name),
        description: Set(input.description),
        visibility: Set(input.visibility),
        cloud_provider: Set(input.cloud_provider),
        blob_url: Set(Some(blob_url)),
        created_at: Set(now),
        last_updated: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(project_id = created.project_id, owner = owner_id, "project created");
    Ok(created)
}

pub async fn list_user_projects(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Vec<project::Model>, ServiceError> {
    project::Entity::find()
        .filter(project::Column::OwnerId.eq(owner_id))
        .order_by_asc(project::Column::ProjectId)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_project(
    db: &DatabaseConnection,
    owner_id: &str,
    project_id: i32,
) -> Result<project::Model, ServiceError> {
    guard::project_owned(db, project_id, owner_id).await
}

pub async fn update_project(
    db: &DatabaseConnection,
    owner_id: &str,
    project_id: i32,
    patch: ProjectPatch,
) -> Result<project::Model, ServiceError> {
    let existing = guard::project_owned(db, project_id, owner_id).await?;
    let mut am: project::ActiveModel = existing.into();
    if let Some(name) = patch.name {
        project::validate_name(&name)?;
        am.name = Set(name);
    }
    if let Some(description) = patch.description {
        am.description = Set(Some(description));
    }
    if let Some(visibility) = patch.visibility {
        project::validate_visibility(&visibility)?;
        am.visibility = Set(visibility);
    }
    if let Some(provider) = patch.cloud_provider {
        am.cloud_provider = Set(Some(provider));
    }
    if let Some(cost) = patch.estimated_cost {
        am.estimated_cost = Set(Some(cost));
    }
    if let Some(availability) = patch.availability {
        am.availability = Set(Some(availability));
    }
    if let Some(durability) = patch.durability {
        am.durability = Set(Some(durability));
    }
    am.last_updated = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Returns false when the project does not exist for this owner. Related
/// rows (issues, comments, deployments, branches) go with it through the
/// cascading foreign keys.
pub async fn delete_project(
    db: &DatabaseConnection,
    owner_id: &str,
    project_id: i32,
) -> Result<bool, ServiceError> {
    let res = project::Entity::delete_many()
        .filter(project::Column::ProjectId.eq(project_id))
        .filter(project::Column::OwnerId.eq(owner_id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    async fn seed_user(db: &sea_orm::DatabaseConnection) -> String {
        let uid = format!("svc_project_user_{}", Uuid::new_v4());
        models::user::create(db, &uid, &format!("u_{}", uid), "Project Tester", &format!("{}@test.com", uid), None, None)
            .await
            .expect("create user");
        uid
    }

    #[tokio::test]
    async fn project_crud_service() {
        let Some(db) = get_db().await else { return };
        let uid = seed_user(&db).await;

        let input = NewProject {
            name: "my stack".into(),
            description: Some("vpc + rds".into()),
            visibility: "private".into(),
            cloud_provider: Some("AWS".into()),
        };
        let created = create_project(&db, &uid, input).await.expect("create");
        assert!(created.blob_url.as_deref().unwrap_or_default().starts_with("blob:"));

        let listed = list_user_projects(&db, &uid).await.expect("list");
        assert_eq!(listed.len(), 1);

        let patch = ProjectPatch { estimated_cost: Some(42.5), ..Default::default() };
        let updated = update_project(&db, &uid, created.project_id, patch).await.expect("update");
        assert_eq!(updated.estimated_cost, Some(42.5));

        // A different caller sees nothing to update
        let patch = ProjectPatch { name: Some("hijack".into()), ..Default::default() };
        let err = update_project(&db, "someone-else", created.project_id, patch).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        assert!(delete_project(&db, &uid, created.project_id).await.expect("delete"));
        assert!(!delete_project(&db, &uid, created.project_id).await.expect("gone"));

        models::user::Entity::delete_by_id(uid).exec(&db).await.expect("cleanup");
    }

    #[tokio::test]
    async fn create_rejects_unknown_owner_and_bad_visibility() {
        let Some(db) = get_db().await else { return };

        let input = NewProject {
            name: "ghost".into(),
            description: None,
            visibility: "public".into(),
            cloud_provider: None,
        };
        let err = create_project(&db, "no-such-user", input).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let uid = seed_user(&db).await;
        let input = NewProject {
            name: "bad vis".into(),
            description: None,
            visibility: "unlisted".into(),
            cloud_provider: None,
        };
        let err = create_project(&db, &uid, input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));

        models::user::Entity::delete_by_id(uid).exec(&db).await.expect("cleanup");
    }
}
