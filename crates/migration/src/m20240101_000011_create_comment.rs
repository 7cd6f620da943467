//! Create `comment` table with FK to `user`.
//!
//! Vote counters default to zero and are deliberately unbounded in both
//! directions; attachment to a project or issue lives in the join tables.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(integer(Comment::CommentId).primary_key().auto_increment())
                    .col(ColumnDef::new(Comment::UserId).string_len(255).null())
                    .col(text(Comment::Content).not_null())
                    .col(integer(Comment::UpVotes).not_null().default(0))
                    .col(integer(Comment::DownVotes).not_null().default(0))
                    .col(timestamp_with_time_zone(Comment::LastModified).not_null())
                    .col(timestamp_with_time_zone(Comment::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_user")
                            .from(Comment::Table, Comment::UserId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Comment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Comment { Table, CommentId, UserId, Content, UpVotes, DownVotes, LastModified, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, UserId }
