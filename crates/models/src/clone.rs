use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::project;

/// Self-referential project join: `project_id` was cloned from
/// `parent_project_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clone")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub project_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub parent_project_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Project,
    ParentProject,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Project => Entity::belongs_to(project::Entity)
                .from(Column::ProjectId)
                .to(project::Column::ProjectId)
                .into(),
            Relation::ParentProject => Entity::belongs_to(project::Entity)
                .from(Column::ParentProjectId)
                .to(project::Column::ProjectId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
