//! Create `commit` table with FKs to `user` and `branch`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Commit::Table)
                    .if_not_exists()
                    .col(integer(Commit::CommitId).primary_key().auto_increment())
                    .col(string_len(Commit::UserId, 255).not_null())
                    .col(integer(Commit::BranchId).not_null())
                    .col(ColumnDef::new(Commit::Role).string_len(255).null())
                    .col(ColumnDef::new(Commit::Msg).text().null())
                    .col(ColumnDef::new(Commit::Hash).text().null())
                    .col(ColumnDef::new(Commit::Url).text().null())
                    .col(timestamp_with_time_zone(Commit::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_commit_user")
                            .from(Commit::Table, Commit::UserId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_commit_branch")
                            .from(Commit::Table, Commit::BranchId)
                            .to(Branch::Table, Branch::BranchId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Commit::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Commit { Table, CommitId, UserId, BranchId, Role, Msg, Hash, Url, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, UserId }

#[derive(DeriveIden)]
enum Branch { Table, BranchId }
