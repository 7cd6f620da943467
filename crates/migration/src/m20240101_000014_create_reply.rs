//! Create `reply` join table marking a comment as a reply to another.
//!
//! `comment_id` is UNIQUE: a comment replies to at most one parent. A comment
//! without a reply row is top-level.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reply::Table)
                    .if_not_exists()
                    .col(integer(Reply::CommentId).unique_key().not_null())
                    .col(integer(Reply::ParentCommentId).not_null())
                    .col(timestamp_with_time_zone(Reply::CreatedAt).not_null())
                    .primary_key(
                        Index::create()
                            .col(Reply::CommentId)
                            .col(Reply::ParentCommentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reply_comment")
                            .from(Reply::Table, Reply::CommentId)
                            .to(Comment::Table, Comment::CommentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reply_parent_comment")
                            .from(Reply::Table, Reply::ParentCommentId)
                            .to(Comment::Table, Comment::CommentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reply::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reply { Table, CommentId, ParentCommentId, CreatedAt }

#[derive(DeriveIden)]
enum Comment { Table, CommentId }
