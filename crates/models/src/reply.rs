use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::comment;

/// Marks `comment_id` as a reply to `parent_comment_id`. A comment without a
/// reply row is top-level.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reply")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub comment_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub parent_comment_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Comment,
    ParentComment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Comment => Entity::belongs_to(comment::Entity)
                .from(Column::CommentId)
                .to(comment::Column::CommentId)
                .into(),
            Relation::ParentComment => Entity::belongs_to(comment::Entity)
                .from(Column::ParentCommentId)
                .to(comment::Column::CommentId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
