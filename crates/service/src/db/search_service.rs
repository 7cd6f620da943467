use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::errors::ServiceError;
use models::{project, user};

/// Case-insensitive substring match over public project names. Only public
/// projects are search-visible, whoever asks.
pub async fn search_projects(
    db: &DatabaseConnection,
    q: &str,
) -> Result<Vec<project::Model>, ServiceError> {
    let q = q.trim().to_lowercase();
    if q.is_empty() {
        return Err(ServiceError::Validation("Missing search query".into()));
    }
    project::Entity::find()
        .filter(
            Condition::all()
                .add(project::Column::Visibility.eq(project::VISIBILITY_PUBLIC))
                .add(
                    Expr::expr(Func::lower(Expr::col(project::Column::Name)))
                        .like(format!("%{}%", q)),
                ),
        )
        .order_by_asc(project::Column::ProjectId)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Case-insensitive substring match over usernames.
pub async fn search_users(db: &DatabaseConnection, q: &str) -> Result<Vec<user::Model>, ServiceError> {
    let q = q.trim().to_lowercase();
    if q.is_empty() {
        return Err(ServiceError::Validation("Missing search query".into()));
    }
    user::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(user::Column::Username))).like(format!("%{}%", q)),
        )
        .order_by_asc(user::Column::UserId)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, Set};
    use uuid::Uuid;

    #[tokio::test]
    async fn blank_query_is_a_validation_error() {
        let Some(db) = get_db().await else { return };
        assert!(matches!(search_projects(&db, "  ").await, Err(ServiceError::Validation(_))));
        assert!(matches!(search_users(&db, "").await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn search_finds_public_projects_case_insensitively() {
        let Some(db) = get_db().await else { return };

        let uid = format!("svc_search_user_{}", Uuid::new_v4());
        models::user::create(&db, &uid, &format!("u_{}", uid), "Search Tester", &format!("{}@test.com", uid), None, None)
            .await
            .expect("create user");
        let marker = Uuid::new_v4().simple().to_string();
        let now = Utc::now().into();
        for (name, visibility) in [
            (format!("Web Shop {}", marker), "public"),
            (format!("web internal {}", marker), "private"),
            (format!("data pipeline {}", marker), "public"),
        ] {
            models::project::ActiveModel {
                owner_id: Set(uid.clone()),
                name: Set(name),
                visibility: Set(visibility.into()),
                created_at: Set(now),
                last_updated: Set(now),
                ..Default::default()
            }
            .insert(&db)
            .await
            .expect("create project");
        }

        let hits = search_projects(&db, &format!("WEB shop {}", marker)).await.expect("search");
        assert_eq!(hits.len(), 1);
        assert!(hits[0].name.starts_with("Web Shop"));

        // Private projects stay invisible even on exact match
        let hits = search_projects(&db, &format!("web internal {}", marker)).await.expect("search");
        assert!(hits.is_empty());

        models::user::Entity::delete_by_id(uid).exec(&db).await.expect("cleanup");
    }
}
