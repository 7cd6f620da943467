use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;

use crate::errors::ServiceError;
use crate::guard;
use models::connection;

#[derive(Debug, Deserialize)]
pub struct NewConnection {
    pub name: String,
    pub cloud_provider: String,
    pub status: Option<String>,
    pub details: Option<serde_json::Value>,
}

/// Fields a connection update may change.
#[derive(Debug, Default, Deserialize)]
pub struct ConnectionPatch {
    pub name: Option<String>,
    pub cloud_provider: Option<String>,
    pub status: Option<String>,
    pub details: Option<serde_json::Value>,
}

pub async fn create_connection(
    db: &DatabaseConnection,
    user_id: &str,
    input: NewConnection,
) -> Result<connection::Model, ServiceError> {
    guard::user_exists(db, user_id).await?;
    connection::validate_name(&input.name)?;
    connection::validate_cloud_provider(&input.cloud_provider)?;

    let now = Utc::now().into();
    connection::ActiveModel {
        user_id: Set(user_id.to_string()),
        name: Set(input.name),
        cloud_provider: Set(input.cloud_provider),
        status: Set(input.status),
        details: Set(input.details),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn list_user_connections(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<connection::Model>, ServiceError> {
    connection::Entity::find()
        .filter(connection::Column::UserId.eq(user_id))
        .order_by_asc(connection::Column::ConnectionId)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Scoped to the owning user so one user can never read another's
/// credentials by id.
pub async fn get_connection(
    db: &DatabaseConnection,
    user_id: &str,
    connection_id: i32,
) -> Result<connection::Model, ServiceError> {
    connection::Entity::find()
        .filter(connection::Column::ConnectionId.eq(connection_id))
        .filter(connection::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("connection"))
}

pub async fn update_connection(
    db: &DatabaseConnection,
    user_id: &str,
    connection_id: i32,
    patch: ConnectionPatch,
) -> Result<connection::Model, ServiceError> {
    let existing = get_connection(db, user_id, connection_id).await?;
    let mut am: connection::ActiveModel = existing.into();
    if let Some(name) = patch.name {
        connection::validate_name(&name)?;
        am.name = Set(name);
    }
    if let Some(provider) = patch.cloud_provider {
        connection::validate_cloud_provider(&provider)?;
        am.cloud_provider = Set(provider);
    }
    if let Some(status) = patch.status {
        am.status = Set(Some(status));
    }
    if let Some(details) = patch.details {
        am.details = Set(Some(details));
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Returns false when the user has no such connection.
pub async fn delete_connection(
    db: &DatabaseConnection,
    user_id: &str,
    connection_id: i32,
) -> Result<bool, ServiceError> {
    let res = connection::Entity::delete_many()
        .filter(connection::Column::ConnectionId.eq(connection_id))
        .filter(connection::Column::UserId.eq(user_id))
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

    #[tokio::test]
    async fn connection_crud_scoped_to_user() {
        let Some(db) = get_db().await else { return };

        let uid = format!("svc_conn_user_{}", Uuid::new_v4());
        models::user::create(&db, &uid, &format!("u_{}", uid), "Conn Tester", &format!("{}@test.com", uid), None, None)
            .await
            .expect("create user");

        let input = NewConnection {
            name: "staging".into(),
            cloud_provider: "Azure".into(),
            status: Some("active".into()),
            details: Some(serde_json::json!({"subscription": "s-1"})),
        };
        let created = create_connection(&db, &uid, input).await.expect("create");

        // Another user cannot see it by id
        let err = get_connection(&db, "other-user", created.connection_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let patch = ConnectionPatch { status: Some("inactive".into()), ..Default::default() };
        let updated = update_connection(&db, &uid, created.connection_id, patch).await.expect("update");
        assert_eq!(updated.status.as_deref(), Some("inactive"));

        assert!(delete_connection(&db, &uid, created.connection_id).await.expect("delete"));
        assert!(!delete_connection(&db, &uid, created.connection_id).await.expect("gone"));

        models::user::Entity::delete_by_id(uid).exec(&db).await.expect("cleanup");
    }
}
