use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use crate::errors::ServiceError;
use crate::guard;
use models::{connection, deployment};

/// Create a deployment for a project through one of the user's provider
/// connections. Guard order: project (scoped to the caller) → connection →
/// connection state. The deployment inherits the project's cloud provider;
/// execution itself happens in an external system, so status and duration
/// are placeholder values.
pub async fn create_deployment(
    db: &DatabaseConnection,
    project_id: i32,
    user_id: &str,
    connection_id: i32,
    version: Option<String>,
) -> Result<deployment::Model, ServiceError> {
    let project = guard::project_owned(db, project_id, user_id).await?;
    let conn = guard::connection_exists(db, connection_id).await?;
    if conn.status.as_deref() != Some(connection::STATUS_ACTIVE) {
        return Err(ServiceError::InvalidState(
            "cannot create deployment, connection is not active".into(),
        ));
    }

    let now = Utc::now().into();
    let created = deployment::ActiveModel {
        user_id: Set(Some(user_id.to_string())),
        project_id: Set(project_id),
        connection_id: Set(connection_id),
        status: Set(Some(deployment::STATUS_SUCCESSFUL.to_string())),
        cloud_provider: Set(project.cloud_provider),
        version: Set(version),
        total_duration: Set(Some("3 seconds".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(deployment_id = created.deployment_id, project_id, "deployment created");
    Ok(created)
}

pub async fn list_project_deployments(
    db: &DatabaseConnection,
    project_id: i32,
) -> Result<Vec<deployment::Model>, ServiceError> {
    deployment::Entity::find()
        .filter(deployment::Column::ProjectId.eq(project_id))
        .order_by_asc(deployment::Column::DeploymentId)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_deployment(
    db: &DatabaseConnection,
    project_id: i32,
    deployment_id: i32,
) -> Result<deployment::Model, ServiceError> {
    deployment::Entity::find()
        .filter(deployment::Column::DeploymentId.eq(deployment_id))
        .filter(deployment::Column::ProjectId.eq(project_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("deployment"))
}

/// Flip the status to canceled. Returns false when no such deployment
/// exists in the project.
pub async fn cancel_deployment(
    db: &DatabaseConnection,
    project_id: i32,
    deployment_id: i32,
) -> Result<bool, ServiceError> {
    let res = deployment::Entity::update_many()
        .col_expr(deployment::Column::Status, Expr::value(deployment::STATUS_CANCELED))
        .col_expr(
            deployment::Column::UpdatedAt,
            Expr::value(chrono::DateTime::<chrono::FixedOffset>::from(Utc::now())),
        )
        .filter(deployment::Column::DeploymentId.eq(deployment_id))
        .filter(deployment::Column::ProjectId.eq(project_id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

pub async fn delete_deployment(
    db: &DatabaseConnection,
    project_id: i32,
    deployment_id: i32,
) -> Result<bool, ServiceError> {
    let res = deployment::Entity::delete_many()
        .filter(deployment::Column::DeploymentId.eq(deployment_id))
        .filter(deployment::Column::ProjectId.eq(project_id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection_service::{self, NewConnection};
    use crate::test_support::get_db;
    use uuid::Uuid;

    async fn seed(db: &sea_orm::DatabaseConnection, conn_status: &str) -> (String, i32, i32) {
        let uid = format!("svc_deploy_user_{}", Uuid::new_v4());
        models::user::create(db, &uid, &format!("u_{}", uid), "Deploy Tester", &format!("{}@test.com", uid), None, None)
            .await
            .expect("create user");
        let now = Utc::now().into();
        let p = models::project::ActiveModel {
            owner_id: Set(uid.clone()),
            name: Set("deploy target".into()),
            visibility: Set(models::project::VISIBILITY_PRIVATE.into()),
            cloud_provider: Set(Some("AWS".into())),
            created_at: Set(now),
            last_updated: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("create project");
        let c = connection_service::create_connection(
            db,
            &uid,
            NewConnection {
                name: "deploy conn".into(),
                cloud_provider: "AWS".into(),
                status: Some(conn_status.into()),
                details: None,
            },
        )
        .await
        .expect("create connection");
        (uid, p.project_id, c.connection_id)
    }

    #[tokio::test]
    async fn active_connection_creates_deployment_with_project_provider() {
        let Some(db) = get_db().await else { return };
        let (uid, pid, cid) = seed(&db, "active").await;

        let created = create_deployment(&db, pid, &uid, cid, Some("v1".into()))
            .await
            .expect("create");
        assert_eq!(created.cloud_provider.as_deref(), Some("AWS"));
        assert_eq!(created.status.as_deref(), Some("successful"));

        assert!(cancel_deployment(&db, pid, created.deployment_id).await.expect("cancel"));
        let after = get_deployment(&db, pid, created.deployment_id).await.expect("get");
        assert_eq!(after.status.as_deref(), Some("canceled"));

        assert!(delete_deployment(&db, pid, created.deployment_id).await.expect("delete"));

        models::user::Entity::delete_by_id(uid).exec(&db).await.expect("cleanup");
    }

    #[tokio::test]
    async fn inactive_connection_is_rejected_without_a_row() {
        let Some(db) = get_db().await else { return };
        let (uid, pid, cid) = seed(&db, "inactive").await;

        let err = create_deployment(&db, pid, &uid, cid, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));

        let rows = list_project_deployments(&db, pid).await.expect("list");
        assert!(rows.is_empty());

        models::user::Entity::delete_by_id(uid).exec(&db).await.expect("cleanup");
    }

    #[tokio::test]
    async fn unknown_connection_is_not_found() {
        let Some(db) = get_db().await else { return };
        let (uid, pid, _cid) = seed(&db, "active").await;

        let err = create_deployment(&db, pid, &uid, 0, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        models::user::Entity::delete_by_id(uid).exec(&db).await.expect("cleanup");
    }
}
