//! Create `project_tag` join table (project many-to-many tag).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectTag::Table)
                    .if_not_exists()
                    .col(integer(ProjectTag::ProjectId).not_null())
                    .col(integer(ProjectTag::TagId).not_null())
                    .primary_key(
                        Index::create()
                            .col(ProjectTag::ProjectId)
                            .col(ProjectTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projecttag_project")
                            .from(ProjectTag::Table, ProjectTag::ProjectId)
                            .to(Project::Table, Project::ProjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projecttag_tag")
                            .from(ProjectTag::Table, ProjectTag::TagId)
                            .to(Tag::Table, Tag::TagId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProjectTag::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProjectTag { Table, ProjectId, TagId }

#[derive(DeriveIden)]
enum Project { Table, ProjectId }

#[derive(DeriveIden)]
enum Tag { Table, TagId }
