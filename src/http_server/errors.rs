//! # API Errors
//!
//! Maps engine errors onto HTTP responses with `{ "error", "code" }` bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::error::AnalyticsError;
use crate::filter::InvalidFilterError;
use crate::observability::Logger;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// The blocking worker panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Analytics(AnalyticsError::InvalidFilter(_)) => StatusCode::BAD_REQUEST,
            ApiError::Analytics(AnalyticsError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Analytics(AnalyticsError::Execution(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Analytics(err) => err.code(),
            ApiError::Internal(_) => "ANALYTICS_INTERNAL",
        }
    }
}

impl From<InvalidFilterError> for ApiError {
    fn from(err: InvalidFilterError) -> Self {
        ApiError::Analytics(err.into())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            Logger::error(
                "HTTP_REQUEST_FAILED",
                &[("code", self.code()), ("reason", self.to_string().as_str())],
            );
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
