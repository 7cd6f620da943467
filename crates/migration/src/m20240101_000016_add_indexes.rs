use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Project: owner listing and public-name search
        manager
            .create_index(
                Index::create()
                    .name("idx_project_owner")
                    .table(Project::Table)
                    .col(Project::OwnerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_project_visibility")
                    .table(Project::Table)
                    .col(Project::Visibility)
                    .to_owned(),
            )
            .await?;

        // Issue: per-project listing
        manager
            .create_index(
                Index::create()
                    .name("idx_issue_project")
                    .table(Issue::Table)
                    .col(Issue::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Connection: per-user listing
        manager
            .create_index(
                Index::create()
                    .name("idx_connection_user")
                    .table(Connection::Table)
                    .col(Connection::UserId)
                    .to_owned(),
            )
            .await?;

        // Deployment: per-project listing
        manager
            .create_index(
                Index::create()
                    .name("idx_deployment_project")
                    .table(Deployment::Table)
                    .col(Deployment::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Join tables: lookup by the comment side
        manager
            .create_index(
                Index::create()
                    .name("idx_projectcomment_comment")
                    .table(ProjectComment::Table)
                    .col(ProjectComment::CommentId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_issuecomment_comment")
                    .table(IssueComment::Table)
                    .col(IssueComment::CommentId)
                    .to_owned(),
            )
            .await?;

        // Reply: children of a parent comment
        manager
            .create_index(
                Index::create()
                    .name("idx_reply_parent")
                    .table(Reply::Table)
                    .col(Reply::ParentCommentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_project_owner").table(Project::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_project_visibility").table(Project::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_issue_project").table(Issue::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_connection_user").table(Connection::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_deployment_project").table(Deployment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projectcomment_comment").table(ProjectComment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_issuecomment_comment").table(IssueComment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reply_parent").table(Reply::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Project { Table, OwnerId, Visibility }

#[derive(DeriveIden)]
enum Issue { Table, ProjectId }

#[derive(DeriveIden)]
enum Connection { Table, UserId }

#[derive(DeriveIden)]
enum Deployment { Table, ProjectId }

#[derive(DeriveIden)]
enum ProjectComment { Table, CommentId }

#[derive(DeriveIden)]
enum IssueComment { Table, CommentId }

#[derive(DeriveIden)]
enum Reply { Table, ParentCommentId }
