//! Create `issue_comment` join table attaching comments to issues.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IssueComment::Table)
                    .if_not_exists()
                    .col(integer(IssueComment::IssueId).not_null())
                    .col(integer(IssueComment::CommentId).not_null())
                    .col(timestamp_with_time_zone(IssueComment::CreatedAt).not_null())
                    .primary_key(
                        Index::create()
                            .col(IssueComment::IssueId)
                            .col(IssueComment::CommentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issuecomment_issue")
                            .from(IssueComment::Table, IssueComment::IssueId)
                            .to(Issue::Table, Issue::IssueId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issuecomment_comment")
                            .from(IssueComment::Table, IssueComment::CommentId)
                            .to(Comment::Table, Comment::CommentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(IssueComment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum IssueComment { Table, IssueId, CommentId, CreatedAt }

#[derive(DeriveIden)]
enum Issue { Table, IssueId }

#[derive(DeriveIden)]
enum Comment { Table, CommentId }
