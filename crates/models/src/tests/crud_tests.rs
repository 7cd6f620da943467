use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    branch, clone, collaborator, comment, commit, connection, issue, project, project_tag, tag,
    user,
};

/// Connect and migrate, or skip the test when no database is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match crate::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

async fn make_user(db: &DatabaseConnection) -> user::Model {
    let uid = format!("user_{}", Uuid::new_v4());
    user::create(db, &uid, &format!("name_{}", uid), "Test User", &format!("{}@example.com", uid), None, None)
        .await
        .expect("create user")
}

async fn make_project(db: &DatabaseConnection, owner: &user::Model) -> project::Model {
    let now = Utc::now().into();
    project::ActiveModel {
        owner_id: Set(owner.user_id.clone()),
        name: Set("crud project".into()),
        description: Set(Some("created by crud tests".into())),
        visibility: Set(project::VISIBILITY_PUBLIC.into()),
        cloud_provider: Set(Some("AWS".into())),
        blob_url: Set(Some(format!("blob:{}", Uuid::new_v4()))),
        created_at: Set(now),
        last_updated: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert project")
}

#[tokio::test]
async fn test_user_crud() {
    let Some(db) = setup_test_db().await else { return };

    let created = make_user(&db).await;
    let found = user::Entity::find_by_id(created.user_id.clone())
        .one(&db)
        .await
        .expect("find user")
        .expect("user exists");
    assert_eq!(found.fullname, "Test User");

    let mut am: user::ActiveModel = found.into();
    am.bio = Set(Some("updated bio".into()));
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&db).await.expect("update user");
    assert_eq!(updated.bio.as_deref(), Some("updated bio"));

    user::Entity::delete_by_id(created.user_id.clone())
        .exec(&db)
        .await
        .expect("delete user");
    let gone = user::Entity::find_by_id(created.user_id).one(&db).await.expect("find");
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_user_validation() {
    assert!(user::validate_email("not-an-email").is_err());
    assert!(user::validate_email("a@b.c").is_ok());
    assert!(user::validate_username("  ").is_err());
    assert!(project::validate_visibility("public").is_ok());
    assert!(project::validate_visibility("friends-only").is_err());
    assert!(comment::validate_content("").is_err());
}

#[tokio::test]
async fn test_project_crud_and_owner_cascade() {
    let Some(db) = setup_test_db().await else { return };

    let owner = make_user(&db).await;
    let p = make_project(&db, &owner).await;
    assert!(p.project_id > 0);

    let by_owner = project::Entity::find()
        .filter(project::Column::OwnerId.eq(owner.user_id.clone()))
        .all(&db)
        .await
        .expect("list projects");
    assert_eq!(by_owner.len(), 1);

    // Deleting the owner cascades to the project
    user::Entity::delete_by_id(owner.user_id.clone()).exec(&db).await.expect("delete owner");
    let gone = project::Entity::find_by_id(p.project_id).one(&db).await.expect("find");
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_comment_defaults() {
    let Some(db) = setup_test_db().await else { return };

    let author = make_user(&db).await;
    let now = Utc::now().into();
    let c = comment::ActiveModel {
        user_id: Set(Some(author.user_id.clone())),
        content: Set("first".into()),
        up_votes: Set(0),
        down_votes: Set(0),
        last_modified: Set(now),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("insert comment");
    assert_eq!(c.up_votes, 0);
    assert_eq!(c.down_votes, 0);

    user::Entity::delete_by_id(author.user_id).exec(&db).await.expect("cleanup user");
}

#[tokio::test]
async fn test_issue_belongs_to_project() {
    let Some(db) = setup_test_db().await else { return };

    let owner = make_user(&db).await;
    let p = make_project(&db, &owner).await;
    let now = Utc::now().into();
    let i = issue::ActiveModel {
        project_id: Set(p.project_id),
        user_id: Set(Some(owner.user_id.clone())),
        title: Set("login broken".into()),
        description: Set("button unresponsive".into()),
        status: Set(Some(issue::STATUS_OPEN.into())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("insert issue");
    assert!(i.closed_at.is_none());

    // Project delete cascades to the issue
    project::Entity::delete_by_id(p.project_id).exec(&db).await.expect("delete project");
    let gone = issue::Entity::find_by_id(i.issue_id).one(&db).await.expect("find issue");
    assert!(gone.is_none());

    user::Entity::delete_by_id(owner.user_id).exec(&db).await.expect("cleanup user");
}

#[tokio::test]
async fn test_version_control_metadata_tables() {
    let Some(db) = setup_test_db().await else { return };

    let owner = make_user(&db).await;
    let p = make_project(&db, &owner).await;
    let now = Utc::now().into();

    let b = branch::ActiveModel {
        project_id: Set(p.project_id),
        name: Set("main".into()),
        last_modified: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("insert branch");

    let c = commit::ActiveModel {
        user_id: Set(owner.user_id.clone()),
        branch_id: Set(b.branch_id),
        msg: Set(Some("initial".into())),
        hash: Set(Some("abc123".into())),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("insert commit");
    assert!(c.commit_id > 0);

    collaborator::ActiveModel {
        user_id: Set(owner.user_id.clone()),
        branch_id: Set(b.branch_id),
        role: Set(Some("maintainer".into())),
        permissions: Set(Some(serde_json::json!({"push": true}))),
    }
    .insert(&db)
    .await
    .expect("insert collaborator");

    let t = tag::ActiveModel {
        name: Set(format!("terraform_{}", Uuid::new_v4())),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("insert tag");
    project_tag::ActiveModel { project_id: Set(p.project_id), tag_id: Set(t.tag_id) }
        .insert(&db)
        .await
        .expect("insert project_tag");

    let fork = make_project(&db, &owner).await;
    clone::ActiveModel {
        project_id: Set(fork.project_id),
        parent_project_id: Set(p.project_id),
        created_at: Set(now),
    }
    .insert(&db)
    .await
    .expect("insert clone");

    // Deleting the parent project cascades through branch, commit,
    // collaborator, tag join and clone rows
    project::Entity::delete_by_id(p.project_id).exec(&db).await.expect("delete project");
    assert!(branch::Entity::find_by_id(b.branch_id).one(&db).await.expect("find").is_none());
    assert!(commit::Entity::find_by_id(c.commit_id).one(&db).await.expect("find").is_none());
    let clones = clone::Entity::find()
        .filter(clone::Column::ParentProjectId.eq(p.project_id))
        .all(&db)
        .await
        .expect("find clones");
    assert!(clones.is_empty());

    tag::Entity::delete_by_id(t.tag_id).exec(&db).await.expect("cleanup tag");
    user::Entity::delete_by_id(owner.user_id).exec(&db).await.expect("cleanup user");
}

#[tokio::test]
async fn test_connection_details_json() {
    let Some(db) = setup_test_db().await else { return };

    let u = make_user(&db).await;
    let now = Utc::now().into();
    let c = connection::ActiveModel {
        user_id: Set(u.user_id.clone()),
        name: Set("prod account".into()),
        cloud_provider: Set("GCP".into()),
        status: Set(Some(connection::STATUS_ACTIVE.into())),
        details: Set(Some(serde_json::json!({"project": "alpha", "region": "us-east1"}))),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("insert connection");

    let found = connection::Entity::find_by_id(c.connection_id)
        .one(&db)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(found.details.unwrap()["region"], "us-east1");

    user::Entity::delete_by_id(u.user_id).exec(&db).await.expect("cleanup user");
}
