use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{comment, project};

/// Join row attaching a comment to a project.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub project_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub comment_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Project,
    Comment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Project => Entity::belongs_to(project::Entity)
                .from(Column::ProjectId)
                .to(project::Column::ProjectId)
                .into(),
            Relation::Comment => Entity::belongs_to(comment::Entity)
                .from(Column::CommentId)
                .to(comment::Column::CommentId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
