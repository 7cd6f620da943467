//! Create `collaborator` join table (user many-to-many branch).
//!
//! `permissions` is a free-form JSONB capability map.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Collaborator::Table)
                    .if_not_exists()
                    .col(string_len(Collaborator::UserId, 255).not_null())
                    .col(integer(Collaborator::BranchId).not_null())
                    .col(ColumnDef::new(Collaborator::Role).string_len(255).null())
                    .col(ColumnDef::new(Collaborator::Permissions).json_binary().null())
                    .primary_key(
                        Index::create()
                            .col(Collaborator::UserId)
                            .col(Collaborator::BranchId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collaborator_user")
                            .from(Collaborator::Table, Collaborator::UserId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collaborator_branch")
                            .from(Collaborator::Table, Collaborator::BranchId)
                            .to(Branch::Table, Branch::BranchId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Collaborator::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Collaborator { Table, UserId, BranchId, Role, Permissions }

#[derive(DeriveIden)]
enum User { Table, UserId }

#[derive(DeriveIden)]
enum Branch { Table, BranchId }
