//! Create `branch` table with FK to `project`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Branch::Table)
                    .if_not_exists()
                    .col(integer(Branch::BranchId).primary_key().auto_increment())
                    .col(integer(Branch::ProjectId).not_null())
                    .col(string_len(Branch::Name, 255).not_null())
                    .col(timestamp_with_time_zone(Branch::LastModified).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_branch_project")
                            .from(Branch::Table, Branch::ProjectId)
                            .to(Project::Table, Project::ProjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Branch::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Branch { Table, BranchId, ProjectId, Name, LastModified }

#[derive(DeriveIden)]
enum Project { Table, ProjectId }
