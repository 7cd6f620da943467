//! Create `issue` table with FKs to `project` and `user`.
//!
//! `closed_at` stays NULL until the issue transitions to `closed`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Issue::Table)
                    .if_not_exists()
                    .col(integer(Issue::IssueId).primary_key().auto_increment())
                    .col(integer(Issue::ProjectId).not_null())
                    .col(ColumnDef::new(Issue::UserId).string_len(255).null())
                    .col(text(Issue::Title).not_null())
                    .col(text(Issue::Description).not_null())
                    .col(ColumnDef::new(Issue::Status).string_len(255).null())
                    .col(
                        ColumnDef::new(Issue::ClosedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Issue::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Issue::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_project")
                            .from(Issue::Table, Issue::ProjectId)
                            .to(Project::Table, Project::ProjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_user")
                            .from(Issue::Table, Issue::UserId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Issue::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Issue { Table, IssueId, ProjectId, UserId, Title, Description, Status, ClosedAt, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Project { Table, ProjectId }

#[derive(DeriveIden)]
enum User { Table, UserId }
