use axum::{
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::pricing::PricingClient;

pub mod comments;
pub mod connections;
pub mod deployments;
pub mod files;
pub mod issues;
pub mod pricing;
pub mod projects;
pub mod search;
pub mod users;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub pricing: PricingClient,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, resource CRUD, search and the
/// pricing proxies.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let users = Router::new()
        .route("/", post(users::create).get(users::list))
        .route(
            "/:user_id",
            get(users::get_by_id).put(users::update).delete(users::remove),
        );

    let projects = Router::new()
        .route("/:user_id", post(projects::create).get(projects::list))
        .route(
            "/:user_id/:project_id",
            get(projects::get_by_id).put(projects::update).delete(projects::remove),
        );

    let comments = Router::new()
        .route("/:project_id", post(comments::create).get(comments::list))
        .route(
            "/:project_id/:comment_id",
            get(comments::get_by_id).put(comments::update).delete(comments::remove),
        );

    let issues = Router::new()
        .route("/:project_id", post(issues::create).get(issues::list))
        .route(
            "/:project_id/:issue_id",
            get(issues::get_by_id).put(issues::update).delete(issues::remove),
        )
        .route(
            "/:project_id/:issue_id/comments",
            post(issues::create_comment).get(issues::list_comments),
        )
        .route(
            "/:project_id/:issue_id/comments/:comment_id",
            put(issues::update_comment).delete(issues::remove_comment),
        );

    let connections = Router::new()
        .route("/:user_id", post(connections::create).get(connections::list))
        .route(
            "/:user_id/:connection_id",
            get(connections::get_by_id)
                .put(connections::update)
                .delete(connections::remove),
        );

    let deployments = Router::new()
        .route("/:project_id", post(deployments::create).get(deployments::list))
        .route(
            "/:project_id/:deployment_id",
            get(deployments::get_by_id).delete(deployments::remove),
        )
        .route("/:project_id/:deployment_id/cancel", put(deployments::cancel));

    let files = Router::new()
        .route("/:project_id", post(files::create).get(files::list))
        .route(
            "/:project_id/:file_id",
            get(files::get_by_id).put(files::update).delete(files::remove),
        );

    let search = Router::new()
        .route("/projects", get(search::projects))
        .route("/users", get(search::users));

    let aws = Router::new()
        .route("/price", post(pricing::aws_price))
        .route("/service/:service_code", get(pricing::aws_service_configs))
        .route(
            "/service/:service_code/:config_name",
            get(pricing::aws_config_values),
        );

    let azure = Router::new().route("/", post(pricing::azure_price));

    let gcp = Router::new().route("/:service_id", get(pricing::gcp_service_skus));

    Router::new()
        .route("/health", get(health))
        .nest("/users", users)
        .nest("/projects", projects)
        .nest("/comments", comments)
        .nest("/issues", issues)
        .nest("/connections", connections)
        .nest("/deployments", deployments)
        .nest("/files", files)
        .nest("/search", search)
        .nest("/aws", aws)
        .nest("/azure", azure)
        .nest("/gcp", gcp)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
