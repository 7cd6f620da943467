//! Comment/reply/vote engine, shared by the project and issue surfaces.
//!
//! The attachment kind selects the join table; everything else (create,
//! list, vote, edit, delete) is one code path.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Serialize;
use tracing::info;

use crate::errors::ServiceError;
use crate::guard;
use models::{comment, issue_comment, project_comment, reply};

/// The entity a comment is attached to, selecting the join table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attachment {
    Project(i32),
    Issue(i32),
}

impl Attachment {
    fn label(&self) -> &'static str {
        match self {
            Attachment::Project(_) => "project",
            Attachment::Issue(_) => "issue",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteAction {
    UpVote,
    RemoveUpVote,
    DownVote,
    RemoveDownVote,
}

impl VoteAction {
    pub fn parse(s: &str) -> Result<Self, ServiceError> {
        match s {
            "up_vote" => Ok(Self::UpVote),
            "remove_up_vote" => Ok(Self::RemoveUpVote),
            "down_vote" => Ok(Self::DownVote),
            "remove_down_vote" => Ok(Self::RemoveDownVote),
            other => Err(ServiceError::Validation(format!("invalid vote action '{}'", other))),
        }
    }

    /// Resolve an action from either the `actions` query parameter or the
    /// legacy `up_vote`/`down_vote` `1`/`-1` form. Supplying both legacy
    /// parameters at once is rejected.
    pub fn from_query(
        actions: Option<&str>,
        up_vote: Option<&str>,
        down_vote: Option<&str>,
    ) -> Result<Option<Self>, ServiceError> {
        if let Some(a) = actions {
            return Self::parse(a).map(Some);
        }
        match (up_vote, down_vote) {
            (None, None) => Ok(None),
            (Some(_), Some(_)) => Err(ServiceError::Validation(
                "cannot supply up_vote and down_vote at the same time".into(),
            )),
            (Some(v), None) => match v {
                "1" => Ok(Some(Self::UpVote)),
                "-1" => Ok(Some(Self::RemoveUpVote)),
                _ => Err(ServiceError::Validation("invalid value for up_vote".into())),
            },
            (None, Some(v)) => match v {
                "1" => Ok(Some(Self::DownVote)),
                "-1" => Ok(Some(Self::RemoveDownVote)),
                _ => Err(ServiceError::Validation("invalid value for down_vote".into())),
            },
        }
    }

    fn column(&self) -> comment::Column {
        match self {
            Self::UpVote | Self::RemoveUpVote => comment::Column::UpVotes,
            Self::DownVote | Self::RemoveDownVote => comment::Column::DownVotes,
        }
    }

    fn delta(&self) -> i32 {
        match self {
            Self::UpVote | Self::DownVote => 1,
            Self::RemoveUpVote | Self::RemoveDownVote => -1,
        }
    }
}

/// Result of creating a comment; `parent_comment` is echoed back when the
/// new comment is a reply so the caller can render the thread.
#[derive(Debug, Serialize)]
pub struct CreatedComment {
    pub comment: comment::Model,
    pub parent_comment: Option<comment::Model>,
}

/// Fields a comment update may carry. `content` is ownership-gated, the
/// vote action is not.
#[derive(Debug, Default)]
pub struct CommentUpdate {
    pub content: Option<String>,
    pub action: Option<VoteAction>,
}

/// Create a comment attached to a project or issue. The comment row, the
/// join row and the optional reply row are written in one transaction so a
/// failure cannot leave an orphan comment behind.
pub async fn create_comment(
    db: &DatabaseConnection,
    attachment: Attachment,
    user_id: &str,
    content: &str,
    parent_comment_id: Option<i32>,
) -> Result<CreatedComment, ServiceError> {
    comment::validate_content(content)?;

    // parent_comment_id == 0 is the wire encoding for "top-level"
    let parent_id = parent_comment_id.filter(|id| *id != 0);
    let parent = match parent_id {
        Some(id) => Some(guard::comment_exists(db, id).await?),
        None => None,
    };

    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let now = Utc::now().into();

    let created = comment::ActiveModel {
        user_id: Set(Some(user_id.to_string())),
        content: Set(content.to_string()),
        up_votes: Set(0),
        down_votes: Set(0),
        last_modified: Set(now),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))?;

    match attachment {
        Attachment::Project(project_id) => {
            project_comment::ActiveModel {
                project_id: Set(project_id),
                comment_id: Set(created.comment_id),
                created_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        }
        Attachment::Issue(issue_id) => {
            issue_comment::ActiveModel {
                issue_id: Set(issue_id),
                comment_id: Set(created.comment_id),
                created_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        }
    }

    if let Some(parent_id) = parent_id {
        reply::ActiveModel {
            comment_id: Set(created.comment_id),
            parent_comment_id: Set(parent_id),
            created_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    }

    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(
        comment_id = created.comment_id,
        attachment = attachment.label(),
        reply = parent_id.is_some(),
        "comment created"
    );

    Ok(CreatedComment { comment: created, parent_comment: parent })
}

/// All comments attached to the project/issue, in insertion order.
pub async fn list_comments(
    db: &DatabaseConnection,
    attachment: Attachment,
) -> Result<Vec<comment::Model>, ServiceError> {
    let ids = attached_comment_ids(db, attachment).await?;
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    comment::Entity::find()
        .filter(comment::Column::CommentId.is_in(ids))
        .order_by_asc(comment::Column::CommentId)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Fetch one comment, requiring that it is attached to the given
/// project/issue. A comment living elsewhere is reported as missing here.
pub async fn get_comment(
    db: &DatabaseConnection,
    attachment: Attachment,
    comment_id: i32,
) -> Result<comment::Model, ServiceError> {
    let found = guard::comment_exists(db, comment_id).await?;
    ensure_attached(db, attachment, comment_id).await?;
    Ok(found)
}

/// Apply a vote action and/or a content edit.
///
/// The vote delta is an atomic column-expression update, so concurrent
/// voters cannot lose increments. Counters are not clamped at zero:
/// repeated remove actions drive them negative. Content changes require
/// ownership; a non-owner supplying content gets `Unauthorized` and nothing
/// is written, vote included.
pub async fn update_comment(
    db: &DatabaseConnection,
    attachment: Attachment,
    comment_id: i32,
    user_id: &str,
    update: CommentUpdate,
) -> Result<comment::Model, ServiceError> {
    let existing = guard::comment_exists(db, comment_id).await?;
    ensure_attached(db, attachment, comment_id).await?;

    if let Some(content) = &update.content {
        guard::comment_owned(&existing, user_id)?;
        comment::validate_content(content)?;
    }

    if update.content.is_none() && update.action.is_none() {
        return Ok(existing);
    }

    let mut stmt = comment::Entity::update_many()
        .filter(comment::Column::CommentId.eq(comment_id));
    if let Some(action) = update.action {
        stmt = stmt.col_expr(
            action.column(),
            Expr::col(action.column()).add(action.delta()),
        );
    }
    if let Some(content) = update.content {
        let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();
        stmt = stmt
            .col_expr(comment::Column::Content, Expr::value(content))
            .col_expr(comment::Column::LastModified, Expr::value(now));
    }
    stmt.exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;

    guard::comment_exists(db, comment_id).await
}

/// Owner-only delete. Join rows and reply rows disappear through the
/// cascading foreign keys, not application logic.
pub async fn delete_comment(
    db: &DatabaseConnection,
    attachment: Attachment,
    comment_id: i32,
    user_id: &str,
) -> Result<(), ServiceError> {
    let existing = guard::comment_exists(db, comment_id).await?;
    ensure_attached(db, attachment, comment_id).await?;
    guard::comment_owned(&existing, user_id)?;

    let res = comment::Entity::delete_by_id(comment_id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("comment"));
    }
    info!(comment_id, attachment = attachment.label(), "comment deleted");
    Ok(())
}

async fn attached_comment_ids(
    db: &DatabaseConnection,
    attachment: Attachment,
) -> Result<Vec<i32>, ServiceError> {
    match attachment {
        Attachment::Project(project_id) => {
            let rows = project_comment::Entity::find()
                .filter(project_comment::Column::ProjectId.eq(project_id))
                .order_by_asc(project_comment::Column::CommentId)
                .all(db)
                .await
                .map_err(|e| ServiceError::Db(e.to_string()))?;
            Ok(rows.into_iter().map(|r| r.comment_id).collect())
        }
        Attachment::Issue(issue_id) => {
            let rows = issue_comment::Entity::find()
                .filter(issue_comment::Column::IssueId.eq(issue_id))
                .order_by_asc(issue_comment::Column::CommentId)
                .all(db)
                .await
                .map_err(|e| ServiceError::Db(e.to_string()))?;
            Ok(rows.into_iter().map(|r| r.comment_id).collect())
        }
    }
}

async fn ensure_attached(
    db: &DatabaseConnection,
    attachment: Attachment,
    comment_id: i32,
) -> Result<(), ServiceError> {
    let attached = match attachment {
        Attachment::Project(project_id) => project_comment::Entity::find()
            .filter(project_comment::Column::ProjectId.eq(project_id))
            .filter(project_comment::Column::CommentId.eq(comment_id))
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .is_some(),
        Attachment::Issue(issue_id) => issue_comment::Entity::find()
            .filter(issue_comment::Column::IssueId.eq(issue_id))
            .filter(issue_comment::Column::CommentId.eq(comment_id))
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .is_some(),
    };
    if attached {
        Ok(())
    } else {
        Err(ServiceError::NotFound(format!(
            "comment not found in this {}",
            attachment.label()
        )))
    }
}
