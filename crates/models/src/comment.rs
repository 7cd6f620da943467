use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::user;

/// A comment body plus its vote counters. Attachment to a project or issue
/// lives in the join tables, never here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub comment_id: i32,
    pub user_id: Option<String>,
    pub content: String,
    pub up_votes: i32,
    pub down_votes: i32,
    pub last_modified: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Author,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Author => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::UserId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_content(c: &str) -> Result<(), errors::ModelError> {
    if c.trim().is_empty() {
        return Err(errors::ModelError::Validation("content required".into()));
    }
    Ok(())
}
