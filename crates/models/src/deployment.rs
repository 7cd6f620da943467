use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{connection, project, user};

pub const STATUS_SUCCESSFUL: &str = "successful";
pub const STATUS_CANCELED: &str = "canceled";

/// A deployment of a project through one of the owner's provider
/// connections. `total_duration` is interval text, not a native interval.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deployment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub deployment_id: i32,
    pub user_id: Option<String>,
    pub project_id: i32,
    pub connection_id: i32,
    pub status: Option<String>,
    pub cloud_provider: Option<String>,
    pub version: Option<String>,
    pub total_duration: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Project,
    Connection,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::UserId)
                .into(),
            Relation::Project => Entity::belongs_to(project::Entity)
                .from(Column::ProjectId)
                .to(project::Column::ProjectId)
                .into(),
            Relation::Connection => Entity::belongs_to(connection::Entity)
                .from(Column::ConnectionId)
                .to(connection::Column::ConnectionId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
