use std::net::{Ipv4Addr, SocketAddr};

use axum::Router;
use migration::MigratorTrait;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, ServerState};
use service::pricing::PricingClient;

struct TestApp {
    base_url: String,
    http: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Boot the full router on an ephemeral port, or skip when no database is
/// configured for the test run.
async fn start_server() -> Option<TestApp> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip api tests");
        return None;
    }

    let db = match models::db::connect().await {
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

    let pricing = PricingClient::new(&configs::PricingConfig::default()).ok()?;
    let state = ServerState { db, pricing };
    let app: Router = routes::build_router(state, CorsLayer::very_permissive());

    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.ok()?;
    let addr: SocketAddr = listener.local_addr().ok()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Some(TestApp {
        base_url: format!("http://{}:{}", addr.ip(), addr.port()),
        http: reqwest::Client::new(),
    })
}

async fn create_user(app: &TestApp) -> String {
    let uid = format!("api_user_{}", Uuid::new_v4());
    let resp = app
        .http
        .post(app.url("/users"))
        .json(&json!({
            "user_id": uid,
            "username": format!("u_{}", uid),
            "fullname": "Api Tester",
            "email": format!("{}@test.com", uid)
        }))
        .send()
        .await
        .expect("create user");
    assert_eq!(resp.status(), 201);
    uid
}

async fn create_project(app: &TestApp, uid: &str, name: &str, visibility: &str) -> i64 {
    let resp = app
        .http
        .post(app.url(&format!("/projects/{}", uid)))
        .json(&json!({
            "name": name,
            "description": "api test project",
            "visibility": visibility,
            "cloud_provider": "AWS"
        }))
        .send()
        .await
        .expect("create project");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("project json");
    body["project_id"].as_i64().expect("project_id")
}

async fn create_connection(app: &TestApp, uid: &str, status: &str) -> i64 {
    let resp = app
        .http
        .post(app.url(&format!("/connections/{}", uid)))
        .json(&json!({
            "name": format!("conn {}", status),
            "cloud_provider": "AWS",
            "status": status
        }))
        .send()
        .await
        .expect("create connection");
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.expect("json");
    body["connection_id"].as_i64().expect("connection_id")
}

#[tokio::test]
async fn health_works() {
    let Some(app) = start_server().await else { return };
    let resp = app.http.get(app.url("/health")).send().await.expect("health");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn comment_thread_votes_and_ownership() {
    let Some(app) = start_server().await else { return };
    let owner = create_user(&app).await;
    let intruder = create_user(&app).await;
    let pid = create_project(&app, &owner, "commented project", "private").await;

    // Top-level comment: parent_comment_id 0 means no reply row
    let resp = app
        .http
        .post(app.url(&format!("/comments/{}", pid)))
        .json(&json!({ "user_id": owner, "content": "first!", "parent_comment_id": 0 }))
        .send()
        .await
        .expect("create comment");
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.expect("json");
    assert!(body["parent_comment"].is_null());
    let comment_id = body["comment"]["comment_id"].as_i64().expect("comment_id");

    // Reply: parent echoed back
    let resp = app
        .http
        .post(app.url(&format!("/comments/{}", pid)))
        .json(&json!({ "user_id": intruder, "content": "replying", "parent_comment_id": comment_id }))
        .send()
        .await
        .expect("create reply");
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["parent_comment"]["comment_id"].as_i64(), Some(comment_id));

    let resp = app
        .http
        .get(app.url(&format!("/comments/{}", pid)))
        .send()
        .await
        .expect("list comments");
    let listed: Value = resp.json().await.expect("json");
    assert_eq!(listed.as_array().map(Vec::len), Some(2));

    // Vote from a non-owner is fine
    let resp = app
        .http
        .put(app.url(&format!("/comments/{}/{}?actions=up_vote", pid, comment_id)))
        .json(&json!({ "user_id": intruder }))
        .send()
        .await
        .expect("up vote");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["up_votes"].as_i64(), Some(1));

    // Inverse action restores, a second remove goes negative
    for expected in [0, -1] {
        let resp = app
            .http
            .put(app.url(&format!("/comments/{}/{}?actions=remove_up_vote", pid, comment_id)))
            .json(&json!({ "user_id": intruder }))
            .send()
            .await
            .expect("remove up vote");
        let body: Value = resp.json().await.expect("json");
        assert_eq!(body["up_votes"].as_i64(), Some(expected));
    }

    // Legacy query form still votes
    let resp = app
        .http
        .put(app.url(&format!("/comments/{}/{}?down_vote=1", pid, comment_id)))
        .json(&json!({ "user_id": intruder }))
        .send()
        .await
        .expect("legacy down vote");
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["down_votes"].as_i64(), Some(1));

    // Non-owner content edit is rejected and nothing changes
    let resp = app
        .http
        .put(app.url(&format!("/comments/{}/{}", pid, comment_id)))
        .json(&json!({ "user_id": intruder, "content": "defaced" }))
        .send()
        .await
        .expect("intruder edit");
    assert_eq!(resp.status(), 401);
    let resp = app
        .http
        .get(app.url(&format!("/comments/{}/{}", pid, comment_id)))
        .send()
        .await
        .expect("re-fetch");
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["content"].as_str(), Some("first!"));

    // Owner edits fine, then deletes; delete is 204 and the list shrinks
    let resp = app
        .http
        .put(app.url(&format!("/comments/{}/{}", pid, comment_id)))
        .json(&json!({ "user_id": owner, "content": "first, edited" }))
        .send()
        .await
        .expect("owner edit");
    assert_eq!(resp.status(), 200);

    let resp = app
        .http
        .delete(app.url(&format!("/comments/{}/{}", pid, comment_id)))
        .json(&json!({ "user_id": owner }))
        .send()
        .await
        .expect("owner delete");
    assert_eq!(resp.status(), 204);

    let resp = app
        .http
        .get(app.url(&format!("/comments/{}", pid)))
        .send()
        .await
        .expect("list again");
    let listed: Value = resp.json().await.expect("json");
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn deployment_requires_active_connection() {
    let Some(app) = start_server().await else { return };
    let uid = create_user(&app).await;
    let pid = create_project(&app, &uid, "deployable", "private").await;

    let active = create_connection(&app, &uid, "active").await;
    let inactive = create_connection(&app, &uid, "inactive").await;

    let resp = app
        .http
        .post(app.url(&format!("/deployments/{}", pid)))
        .json(&json!({ "user_id": uid, "connection_id": active, "version": "v1" }))
        .send()
        .await
        .expect("deploy active");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body["cloud_provider"].as_str(), Some("AWS"));

    let resp = app
        .http
        .post(app.url(&format!("/deployments/{}", pid)))
        .json(&json!({ "user_id": uid, "connection_id": inactive }))
        .send()
        .await
        .expect("deploy inactive");
    assert_eq!(resp.status(), 400);

    let resp = app
        .http
        .get(app.url(&format!("/deployments/{}", pid)))
        .send()
        .await
        .expect("list deployments");
    let listed: Value = resp.json().await.expect("json");
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn search_contract() {
    let Some(app) = start_server().await else { return };
    let uid = create_user(&app).await;
    let marker = Uuid::new_v4().simple().to_string();
    create_project(&app, &uid, &format!("Web Portal {}", marker), "public").await;
    create_project(&app, &uid, &format!("web hidden {}", marker), "private").await;

    let resp = app
        .http
        .get(app.url("/search/projects"))
        .send()
        .await
        .expect("search without q");
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body, json!({ "message": "Missing search query" }));

    let resp = app
        .http
        .get(app.url("/search/projects"))
        .query(&[("q", format!("WEB portal {}", marker))])
        .send()
        .await
        .expect("search with q");
    assert_eq!(resp.status(), 200);
    let hits: Value = resp.json().await.expect("json");
    assert_eq!(hits.as_array().map(Vec::len), Some(1));
    assert_eq!(hits[0]["visibility"].as_str(), Some("public"));
}

#[tokio::test]
async fn file_stubs_check_the_parent_project() {
    let Some(app) = start_server().await else { return };
    let uid = create_user(&app).await;
    let pid = create_project(&app, &uid, "filed", "private").await;

    let resp = app
        .http
        .get(app.url(&format!("/files/{}", pid)))
        .send()
        .await
        .expect("list files");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("json");
    assert_eq!(body, json!([{ "file": "main.tf" }]));

    let resp = app
        .http
        .get(app.url("/files/0"))
        .send()
        .await
        .expect("list files of missing project");
    assert_eq!(resp.status(), 404);
}
