use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{comment, issue};

/// Join row attaching a comment to an issue.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issue_comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub issue_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub comment_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Issue,
    Comment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Issue => Entity::belongs_to(issue::Entity)
                .from(Column::IssueId)
                .to(issue::Column::IssueId)
                .into(),
            Relation::Comment => Entity::belongs_to(comment::Entity)
                .from(Column::CommentId)
                .to(comment::Column::CommentId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
