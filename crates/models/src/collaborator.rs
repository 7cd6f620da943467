use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{branch, user};

/// Membership of a user on a branch, with a role label and a free-form
/// permission map.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "collaborator")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub branch_id: i32,
    pub role: Option<String>,
    pub permissions: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Branch,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
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
