use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{project, user};

pub const STATUS_OPEN: &str = "open";
pub const STATUS_CLOSED: &str = "closed";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issue")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub issue_id: i32,
    pub project_id: i32,
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    pub status: Option<String>,
    pub closed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Project,
    Reporter,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Project => Entity::belongs_to(project::Entity)
                .from(Column::ProjectId)
                .to(project::Column::ProjectId)
                .into(),
            Relation::Reporter => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::UserId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(t: &str) -> Result<(), errors::ModelError> {
    if t.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    Ok(())
}
