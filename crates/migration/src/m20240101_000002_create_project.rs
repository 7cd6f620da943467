//! Create `project` table with FK to `user`.
//!
//! Carries denormalized counters (likes, clones, commits) and the estimated
//! cost/availability/durability figures computed by the pricing flows.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(integer(Project::ProjectId).primary_key().auto_increment())
                    .col(string_len(Project::OwnerId, 255).not_null())
                    .col(string_len(Project::Name, 255).not_null())
                    .col(ColumnDef::new(Project::Description).text().null())
                    .col(string_len(Project::Visibility, 255).not_null())
                    .col(ColumnDef::new(Project::CloudProvider).string_len(255).null())
                    .col(ColumnDef::new(Project::BlobUrl).text().null())
                    .col(ColumnDef::new(Project::EstimatedCost).double().null())
                    .col(ColumnDef::new(Project::Availability).double().null())
                    .col(ColumnDef::new(Project::Durability).double().null())
                    .col(ColumnDef::new(Project::LikeCount).integer().null())
                    .col(ColumnDef::new(Project::CloneCount).integer().null())
                    .col(ColumnDef::new(Project::CommitCount).integer().null())
                    .col(timestamp_with_time_zone(Project::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Project::LastUpdated).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_owner")
                            .from(Project::Table, Project::OwnerId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Project::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Project {
    Table,
    ProjectId,
    OwnerId,
    Name,
    Description,
    Visibility,
    CloudProvider,
    BlobUrl,
    EstimatedCost,
    Availability,
    Durability,
    LikeCount,
    CloneCount,
    CommitCount,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum User { Table, UserId }
