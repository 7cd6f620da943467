//! Create `user` table.
//!
//! The primary key is issued by the external identity provider, so it is a
//! plain string rather than a generated id.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string_len(User::UserId, 255).primary_key())
                    .col(string_len(User::Username, 255).unique_key().not_null())
                    .col(string_len(User::Fullname, 255).not_null())
                    .col(string_len(User::Email, 255).unique_key().not_null())
                    .col(ColumnDef::new(User::ProfileImgUrl).text().null())
                    .col(ColumnDef::new(User::Bio).text().null())
                    .col(timestamp_with_time_zone(User::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(User::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User { Table, UserId, Username, Fullname, Email, ProfileImgUrl, Bio, CreatedAt, UpdatedAt }
