//! Error types for web handlers
//!
//! Bridges domain errors into HTTP responses. Domain errors are mapped to
//! the documented status codes and a JSON `{code, message}` body; raw
//! storage errors are logged and never leaked to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::utils::errors::GatherHubError;

/// Application error type for web handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<GatherHubError> for ApiError {
    fn from(err: GatherHubError) -> Self {
        match err {
            GatherHubError::EventNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "EVENT_NOT_FOUND", err.to_string())
            }
            GatherHubError::UserNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "USER_NOT_FOUND", err.to_string())
            }
            GatherHubError::NotRegistered { .. } => Self::new(
                StatusCode::NOT_FOUND,
                "NOT_REGISTERED",
                "You are not registered for this event",
            ),
            GatherHubError::EventNotAvailable => Self::new(
                StatusCode::BAD_REQUEST,
                "EVENT_NOT_AVAILABLE",
                "Event is not available for RSVP",
            ),
            GatherHubError::CapacityConflict => Self::new(
                StatusCode::CONFLICT,
                "CAPACITY_CONFLICT",
                "RSVP could not be admitted due to concurrent requests, please retry",
            ),
            GatherHubError::Unauthorized => {
                Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Authentication required")
            }
            GatherHubError::PermissionDenied(message) => {
                Self::new(StatusCode::FORBIDDEN, "PERMISSION_DENIED", message)
            }
            GatherHubError::InvalidInput(message) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message)
            }
            GatherHubError::ServiceUnavailable(message) => {
                error!(error = %message, "Service unavailable");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", message)
            }
            other => {
                error!(error = %other, "Internal server error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "An internal error occurred",
                )
            }
        }
    }
}

/// Error response body (JSON)
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}
