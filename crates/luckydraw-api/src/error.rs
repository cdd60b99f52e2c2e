//! Luckydraw API — error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use luckydraw_core::error::DrawError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Tracing or span export could not be initialized.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorBody {
    /// Pairs `body` with `status` as a response.
    pub fn respond(status: StatusCode, error: &'static str, message: impl Into<String>) -> Response {
        let body = Self {
            error,
            message: message.into(),
        };
        (status, Json(body)).into_response()
    }
}

/// HTTP-layer wrapper around `DrawError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DrawError);

impl From<DrawError> for ApiError {
    fn from(err: DrawError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DrawError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DrawError::RangeExhausted { .. } => (StatusCode::BAD_REQUEST, "range_exhausted"),
            DrawError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            DrawError::OverrideUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "override_unavailable")
            }
            DrawError::PersistenceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "persistence_unavailable")
            }
        };

        ErrorBody::respond(status, error_code, self.0.to_string())
    }
}
