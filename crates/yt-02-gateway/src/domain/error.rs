//! Error types and their HTTP rendering.
//!
//! | Outcome | Status |
//! |---------|--------|
//! | Access denied | 302 to the guard's redirect target |
//! | Validation failure | 400 with per-field messages |
//! | Unknown group, user, post or route | 404 |
//! | Store failure | 500 |

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;
use yt_01_posts::{NotFoundError, PostError};

/// Request-level failure rendered as an HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Failure reported by the posts core
    #[error(transparent)]
    Post(#[from] PostError),

    /// No route matches the request path
    #[error("no route for {0}")]
    RouteNotFound(String),
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// `302 Found` pointing at `location`.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn field_error(field: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "errors": { field: [message] } })),
    )
        .into_response()
}

fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Post(PostError::Denied(denial)) => found(denial.redirect_to()),
            ApiError::Post(PostError::Validation(err)) => {
                field_error(err.field(), &err.to_string())
            }
            ApiError::Post(PostError::NotFound(err)) => not_found(err.to_string()),
            ApiError::Post(PostError::Store(err)) => {
                error!(error = %err, "[yt-02] Store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error" })),
                )
                    .into_response()
            }
            ApiError::RouteNotFound(path) => not_found(format!("no route for {path}")),
        }
    }
}

impl From<NotFoundError> for ApiError {
    fn from(err: NotFoundError) -> Self {
        ApiError::Post(PostError::NotFound(err))
    }
}

/// Gateway-level errors (startup and server lifecycle)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server task failed
    #[error("server error: {0}")]
    Server(String),
}
