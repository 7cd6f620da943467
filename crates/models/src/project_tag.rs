use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{project, tag};

/// Join row labelling a project with a tag.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub project_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Project,
    Tag,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Project => Entity::belongs_to(project::Entity)
                .from(Column::ProjectId)
                .to(project::Column::ProjectId)
                .into(),
            Relation::Tag => Entity::belongs_to(tag::Entity)
                .from(Column::TagId)
                .to(tag::Column::TagId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
