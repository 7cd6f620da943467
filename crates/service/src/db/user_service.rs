use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use chrono::Utc;
use serde::Deserialize;

use crate::errors::ServiceError;
use crate::guard;
use models::user;

/// Fields a user update may change. Anything absent stays untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub profile_img_url: Option<String>,
    pub bio: Option<String>,
}

pub async fn create_user(
    db: &DatabaseConnection,
    user_id: &str,
    username: &str,
    fullname: &str,
    email: &str,
    profile_img_url: Option<String>,
    bio: Option<String>,
) -> Result<user::Model, ServiceError> {
    Ok(user::create(db, user_id, username, fullname, email, profile_img_url, bio).await?)
}

pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    user::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_user(db: &DatabaseConnection, user_id: &str) -> Result<user::Model, ServiceError> {
    guard::user_exists(db, user_id).await
}

pub async fn update_user(
    db: &DatabaseConnection,
    user_id: &str,
    patch: UserPatch,
) -> Result<user::Model, ServiceError> {
    let existing = guard::user_exists(db, user_id).await?;
    let mut am: user::ActiveModel = existing.into();
    if let Some(username) = patch.username {
        user::validate_username(&username)?;
        am.username = Set(username);
    }
    if let Some(fullname) = patch.fullname {
        am.fullname = Set(fullname);
    }
    if let Some(email) = patch.email {
        user::validate_email(&email)?;
        am.email = Set(email);
    }
    if let Some(url) = patch.profile_img_url {
        am.profile_img_url = Set(Some(url));
    }
    if let Some(bio) = patch.bio {
        am.bio = Set(Some(bio));
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Returns false when there was nothing to delete.
pub async fn delete_user(db: &DatabaseConnection, user_id: &str) -> Result<bool, ServiceError> {
    let res = user::Entity::delete_by_id(user_id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
