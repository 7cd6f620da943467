use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user;

pub const VISIBILITY_PUBLIC: &str = "public";
pub const VISIBILITY_PRIVATE: &str = "private";

/// Infrastructure-as-code project. `blob_url` points at the external file
/// store; cost/availability/durability come from the pricing flows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub project_id: i32,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub visibility: String,
    pub cloud_provider: Option<String>,
    pub blob_url: Option<String>,
    pub estimated_cost: Option<f64>,
    pub availability: Option<f64>,
    pub durability: Option<f64>,
    pub like_count: Option<i32>,
    pub clone_count: Option<i32>,
    pub commit_count: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub last_updated: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(user::Entity)
                .from(Column::OwnerId)
                .to(user::Column::UserId)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(n: &str) -> Result<(), errors::ModelError> {
    if n.trim().is_empty() {
        return Err(errors::ModelError::Validation("project name required".into()));
    }
    Ok(())
}

pub fn validate_visibility(v: &str) -> Result<(), errors::ModelError> {
    if v != VISIBILITY_PUBLIC && v != VISIBILITY_PRIVATE {
        return Err(errors::ModelError::Validation(
            "visibility must be 'public' or 'private'".into(),
        ));
    }
    Ok(())
}
