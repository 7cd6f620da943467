//! Create `clone` table, a self-referential project join.
//!
//! `project_id` is the clone, `parent_project_id` the project it was cloned
//! from. A project can be cloned from at most one parent.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clone::Table)
                    .if_not_exists()
                    .col(integer(Clone::ProjectId).unique_key().not_null())
                    .col(integer(Clone::ParentProjectId).not_null())
                    .primary_key(
                        Index::create()
                            .col(Clone::ProjectId)
                            .col(Clone::ParentProjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clone_project")
                            .from(Clone::Table, Clone::ProjectId)
                            .to(Project::Table, Project::ProjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clone_parent_project")
                            .from(Clone::Table, Clone::ParentProjectId)
                            .to(Project::Table, Project::ProjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Clone::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Clone { Table, ProjectId, ParentProjectId }

#[derive(DeriveIden)]
enum Project { Table, ProjectId }
