use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use models::errors::ModelError;
use service::errors::ServiceError;

/// Client-facing error. Every `ServiceError` kind maps to exactly one
/// status; persistence detail is logged here and never serialized to the
/// client.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(message: &str) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.to_string() }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let (status, message) = match e {
            ServiceError::Validation(m) => (StatusCode::BAD_REQUEST, m),
            ServiceError::InvalidState(m) => (StatusCode::BAD_REQUEST, m),
            ServiceError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
            ServiceError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ServiceError::UpstreamNoData(m) => (StatusCode::NOT_FOUND, m),
            ServiceError::Upstream(m) => (StatusCode::BAD_GATEWAY, m),
            ServiceError::Model(ModelError::Validation(m)) => (StatusCode::BAD_REQUEST, m),
            ServiceError::Model(ModelError::Db(detail)) | ServiceError::Db(detail) => {
                error!(error = %detail, "persistence failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "message": self.message }))).into_response()
    }
}
