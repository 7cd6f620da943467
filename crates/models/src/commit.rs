use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{branch, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "commit")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub commit_id: i32,
    pub user_id: String,
    pub branch_id: i32,
    pub role: Option<String>,
    pub msg: Option<String>,
    pub hash: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Author,
    Branch,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Author => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::UserId)
                .into(),
            Relation::Branch => Entity::belongs_to(branch::Entity)
                .from(Column::BranchId)
                .to(branch::Column::BranchId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
