//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_user;
mod m20240101_000002_create_project;
mod m20240101_000003_create_tag;
mod m20240101_000004_create_project_tag;
mod m20240101_000005_create_connection;
mod m20240101_000006_create_branch;
mod m20240101_000007_create_commit;
mod m20240101_000008_create_collaborator;
mod m20240101_000009_create_clone;
mod m20240101_000010_create_issue;
mod m20240101_000011_create_comment;
mod m20240101_000012_create_project_comment;
mod m20240101_000013_create_issue_comment;
mod m20240101_000014_create_reply;
mod m20240101_000015_create_deployment;
mod m20240101_000016_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_user::Migration),
            Box::new(m20240101_000002_create_project::Migration),
            Box::new(m20240101_000003_create_tag::Migration),
            Box::new(m20240101_000004_create_project_tag::Migration),
            Box::new(m20240101_000005_create_connection::Migration),
            Box::new(m20240101_000006_create_branch::Migration),
            Box::new(m20240101_000007_create_commit::Migration),
            Box::new(m20240101_000008_create_collaborator::Migration),
            Box::new(m20240101_000009_create_clone::Migration),
            Box::new(m20240101_000010_create_issue::Migration),
            Box::new(m20240101_000011_create_comment::Migration),
            Box::new(m20240101_000012_create_project_comment::Migration),
            Box::new(m20240101_000013_create_issue_comment::Migration),
            Box::new(m20240101_000014_create_reply::Migration),
            Box::new(m20240101_000015_create_deployment::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000016_add_indexes::Migration),
        ]
    }
}
