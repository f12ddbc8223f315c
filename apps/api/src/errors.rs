use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm_client::CompletionError;

/// Routes advertised in the body of an unknown `/api/*` request.
pub const AVAILABLE_ROUTES: &[&str] = &[
    "GET /api/health",
    "POST /api/generate-cover-letter",
    "POST /api/parse-job-posting",
    "PUT /api/session/:id/user-info",
    "GET /api/session/:id/user-info",
    "PUT /api/session/:id/job-info",
    "GET /api/session/:id/job-info",
    "POST /api/session/:id/job-posting",
    "GET /api/session/:id/letter-options",
    "PATCH /api/session/:id/letter-options",
    "POST /api/session/:id/generate",
    "GET /api/session/:id/cover-letter",
];

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Invalid completion credentials: {0}")]
    InvalidCredentials(String),

    #[error("Completion quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Upstream failure other than auth or billing. `details` is only set in development.
    #[error("Generation failed")]
    Generation { details: Option<String> },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON body extractor whose rejections (malformed JSON, wrong content type, wrong
/// shape) are answered with the API error body instead of axum's plain text.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    /// Maps a completion failure that was not recovered locally.
    pub fn from_completion(err: CompletionError, expose_details: bool) -> Self {
        match err {
            CompletionError::InvalidCredentials(msg) => AppError::InvalidCredentials(msg),
            CompletionError::InsufficientQuota(msg) => AppError::QuotaExceeded(msg),
            other => {
                tracing::error!("Completion error: {other}");
                AppError::Generation {
                    details: expose_details.then(|| other.to_string()),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::RouteNotFound(_) => (
                StatusCode::NOT_FOUND,
                "ROUTE_NOT_FOUND",
                "Route not found".to_string(),
            ),
            AppError::InvalidCredentials(msg) => {
                tracing::error!("Completion credentials rejected: {msg}");
                (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    "Invalid OpenAI API key. Please check your configuration.".to_string(),
                )
            }
            AppError::QuotaExceeded(msg) => {
                tracing::error!("Completion quota exhausted: {msg}");
                (
                    StatusCode::PAYMENT_REQUIRED,
                    "QUOTA_EXCEEDED",
                    "OpenAI API quota exceeded. Please check your billing details.".to_string(),
                )
            }
            AppError::Generation { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GENERATION_ERROR",
                "Failed to generate cover letter. Please try again.".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let AppError::Generation {
            details: Some(details),
        } = &self
        {
            body["details"] = Value::String(details.clone());
        }
        if let AppError::RouteNotFound(path) = &self {
            body["path"] = Value::String(path.clone());
            body["availableRoutes"] = json!(AVAILABLE_ROUTES);
        }

        (status, Json(body)).into_response()
    }
}
