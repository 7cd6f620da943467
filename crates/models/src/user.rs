use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::project;

/// Platform account. The id is issued by the external identity provider and
/// arrives pre-verified on every request.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub profile_img_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Project,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Project => Entity::has_many(project::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(u: &str) -> Result<(), errors::ModelError> {
    if u.trim().is_empty() {
        return Err(errors::ModelError::Validation("username required".into()));
    }
    Ok(())
}

pub fn validate_email(e: &str) -> Result<(), errors::ModelError> {
    if !e.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: &str,
    username: &str,
    fullname: &str,
    email: &str,
    profile_img_url: Option<String>,
    bio: Option<String>,
) -> Result<Model, errors::ModelError> {
    if user_id.trim().is_empty() {
        return Err(errors::ModelError::Validation("user_id required".into()));
    }
    validate_username(username)?;
    validate_email(email)?;
    if fullname.trim().is_empty() {
        return Err(errors::ModelError::Validation("fullname required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        user_id: Set(user_id.to_string()),
        username: Set(username.to_string()),
        fullname: Set(fullname.to_string()),
        email: Set(email.to_string()),
        profile_img_url: Set(profile_img_url),
        bio: Set(bio),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
