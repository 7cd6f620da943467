//! Create `project_comment` join table attaching comments to projects.
//!
//! Both FKs cascade so deleting either side removes the attachment row.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectComment::Table)
                    .if_not_exists()
                    .col(integer(ProjectComment::ProjectId).not_null())
                    .col(integer(ProjectComment::CommentId).not_null())
                    .col(timestamp_with_time_zone(ProjectComment::CreatedAt).not_null())
                    .primary_key(
                        Index::create()
                            .col(ProjectComment::ProjectId)
                            .col(ProjectComment::CommentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projectcomment_project")
                            .from(ProjectComment::Table, ProjectComment::ProjectId)
                            .to(Project::Table, Project::ProjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projectcomment_comment")
                            .from(ProjectComment::Table, ProjectComment::CommentId)
                            .to(Comment::Table, Comment::CommentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProjectComment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProjectComment { Table, ProjectId, CommentId, CreatedAt }

#[derive(DeriveIden)]
enum Project { Table, ProjectId }

#[derive(DeriveIden)]
enum Comment { Table, CommentId }
