//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pitchside_core::PitchsideError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new("NOT_FOUND", format!("{resource} not found"))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal_error() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    RateLimited(String),
    Upstream(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::not_found(&msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::bad_request(msg)),
            AppError::RateLimited(msg) => (
                StatusCode::TOO_MANY_REQUESTS,
                ApiError::new("RATE_LIMITED", "Upstream rate limit reached").with_details(msg),
            ),
            AppError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                ApiError::new("UPSTREAM_ERROR", "Upstream service failed").with_details(msg),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal_error().with_details(msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<PitchsideError> for AppError {
    fn from(err: PitchsideError) -> Self {
        match err {
            PitchsideError::NotFound(msg) => AppError::NotFound(msg),
            PitchsideError::ValidationError(msg) => AppError::BadRequest(msg),
            PitchsideError::InvalidPattern { .. } => AppError::BadRequest(err.to_string()),
            PitchsideError::RateLimited(msg) => AppError::RateLimited(msg),
            PitchsideError::DataSourceError(msg) => AppError::Upstream(msg),
            PitchsideError::LlmError(msg) => AppError::Upstream(format!("LLM error: {msg}")),
            PitchsideError::ConfigError(msg) => {
                AppError::Internal(format!("Configuration error: {msg}"))
            }
            PitchsideError::Other(err) => AppError::Internal(err.to_string()),
        }
    }
}
