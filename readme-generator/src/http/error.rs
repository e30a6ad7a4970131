//! HTTP error responses.

use crate::analyzer::AnalyzeError;
use crate::generator::GenerateError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Error payload returned to API callers as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    /// Creates an error with an explicit status.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Caller-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: &self.message,
        });
        (self.status, body).into_response()
    }
}

fn status_or_internal(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl From<AnalyzeError> for ApiError {
    fn from(error: AnalyzeError) -> Self {
        warn!(error = %error, "Analysis failed");
        Self::new(status_or_internal(error.status_code()), error.user_message())
    }
}

impl From<GenerateError> for ApiError {
    fn from(error: GenerateError) -> Self {
        warn!(error = %error, "Generation failed");
        Self::new(status_or_internal(error.status_code()), error.user_message())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected request body");
        Self::new(StatusCode::BAD_REQUEST, "Request body must be valid JSON.")
    }
}

/// Errors raised while wiring the service together at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The GitHub client could not be built.
    #[error("Failed to build GitHub client: {0}")]
    GitHub(#[from] octocrab::Error),
}
