use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::project;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "branch")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub branch_id: i32,
    pub project_id: i32,
    pub name: String,
    pub last_modified: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Project,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Project => Entity::belongs_to(project::Entity)
                .from(Column::ProjectId)
                .to(project::Column::ProjectId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
