//! Create `connection` table with FK to `user`.
//!
//! `details` holds the provider-specific credential/config blob as JSONB.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Connection::Table)
                    .if_not_exists()
                    .col(integer(Connection::ConnectionId).primary_key().auto_increment())
                    .col(string_len(Connection::UserId, 255).not_null())
                    .col(string_len(Connection::Name, 255).not_null())
                    .col(string_len(Connection::CloudProvider, 255).not_null())
                    .col(ColumnDef::new(Connection::Status).string_len(255).null())
                    .col(ColumnDef::new(Connection::Details).json_binary().null())
                    .col(timestamp_with_time_zone(Connection::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Connection::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_connection_user")
                            .from(Connection::Table, Connection::UserId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Connection::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Connection { Table, ConnectionId, UserId, Name, CloudProvider, Status, Details, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, UserId }
