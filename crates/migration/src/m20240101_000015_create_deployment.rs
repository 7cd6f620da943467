//! Create `deployment` table with FKs to `user`, `project` and `connection`.
//!
//! `total_duration` is stored as text; the backing store's interval type is
//! not exposed through the entity layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deployment::Table)
                    .if_not_exists()
                    .col(integer(Deployment::DeploymentId).primary_key().auto_increment())
                    .col(ColumnDef::new(Deployment::UserId).string_len(255).null())
                    .col(integer(Deployment::ProjectId).not_null())
                    .col(integer(Deployment::ConnectionId).not_null())
                    .col(ColumnDef::new(Deployment::Status).string_len(255).null())
                    .col(ColumnDef::new(Deployment::CloudProvider).string_len(255).null())
                    .col(ColumnDef::new(Deployment::Version).string_len(255).null())
                    .col(ColumnDef::new(Deployment::TotalDuration).string_len(255).null())
                    .col(timestamp_with_time_zone(Deployment::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Deployment::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deployment_user")
                            .from(Deployment::Table, Deployment::UserId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deployment_project")
                            .from(Deployment::Table, Deployment::ProjectId)
                            .to(Project::Table, Project::ProjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deployment_connection")
                            .from(Deployment::Table, Deployment::ConnectionId)
                            .to(Connection::Table, Connection::ConnectionId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Deployment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Deployment { Table, DeploymentId, UserId, ProjectId, ConnectionId, Status, CloudProvider, Version, TotalDuration, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, UserId }

#[derive(DeriveIden)]
enum Project { Table, ProjectId }

#[derive(DeriveIden)]
enum Connection { Table, ConnectionId }
