use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user;

pub const STATUS_ACTIVE: &str = "active";

/// Stored credential/configuration set linking a user to a cloud provider
/// account. `details` is the opaque provider blob.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "connection")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub connection_id: i32,
    pub user_id: String,
    pub name: String,
    pub cloud_provider: String,
    pub status: Option<String>,
    pub details: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::UserId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(n: &str) -> Result<(), errors::ModelError> {
    if n.trim().is_empty() {
        return Err(errors::ModelError::Validation("connection name required".into()));
    }
    Ok(())
}

pub fn validate_cloud_provider(p: &str) -> Result<(), errors::ModelError> {
    if p.trim().is_empty() {
        return Err(errors::ModelError::Validation("cloud_provider required".into()));
    }
    Ok(())
}
