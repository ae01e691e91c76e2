use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message shown to clients when the movie catalog cannot be reached
pub const UPSTREAM_UNAVAILABLE_MESSAGE: &str = "Movie service unavailable. Please try again later.";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A uniqueness constraint rejected a write
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Catalog fetch exhausted its retries; holds the last cause
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::ConfigurationMissing(msg) | AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::UpstreamUnavailable(cause) => {
                tracing::error!(cause = %cause, "Movie catalog unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    UPSTREAM_UNAVAILABLE_MESSAGE.to_string(),
                )
            }
            AppError::Database(_) | AppError::Cache(_) | AppError::HttpClient(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
