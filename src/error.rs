//! Error types for the todo API.
//!
//! Two layers of errors live here:
//!
//! - [`StoreError`] — the record store's failure mode (the storage medium
//!   is unavailable or rejected a write). Absence of a record is never an
//!   error; repositories report it as `Option`/`bool`.
//! - [`AppError`] — the HTTP boundary error, implementing Axum's
//!   `IntoResponse` so handlers can bubble failures with `?`.

use crate::validation::FieldError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failure of the underlying record store.
///
/// Not-found outcomes are modelled as explicit absent values, so this type
/// only covers genuine storage failures. They propagate to the caller as an
/// internal error and are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The storage medium failed or rejected the operation.
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Application error type for HTTP handlers.
///
/// Wraps domain errors and provides HTTP-friendly error responses. The
/// internal source is logged for server errors but never exposed to the
/// client.
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code.
    status: StatusCode,
    /// User-facing error message.
    message: String,
    /// Error code for client-side handling.
    code: String,
    /// Per-field failures for validation errors.
    errors: Vec<FieldError>,
    /// Internal error, for logging only.
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            errors: Vec::new(),
            source: None,
        }
    }

    /// Attach a source error for logging.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error listing each failing field.
    #[must_use]
    pub fn validation(errors: Vec<FieldError>) -> Self {
        let mut err = Self::new(
            StatusCode::BAD_REQUEST,
            "Validation failed".to_string(),
            "VALIDATION_ERROR".to_string(),
        );
        err.errors = errors;
        err
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} with id {id} not found"),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal("An internal error occurred").with_source(err.into())
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error code for client-side handling.
    code: String,
    /// Human-readable error message.
    message: String,
    /// Per-field failures, present for validation errors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
            errors: self.errors,
        };

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AppError::internal("An internal error occurred");
        assert_eq!(
            err.to_string(),
            "[INTERNAL_SERVER_ERROR] An internal error occurred"
        );
    }

    #[test]
    fn not_found_mentions_resource_and_id() {
        let err = AppError::not_found("Todo", 123);
        assert_eq!(err.to_string(), "[NOT_FOUND] Todo with id 123 not found");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_carries_field_errors() {
        let err = AppError::validation(vec![FieldError {
            field: "title",
            message: "Title is required",
        }]);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.errors.len(), 1);
    }

    #[test]
    fn store_error_maps_to_internal() {
        let err = AppError::from(StoreError::Database("connection refused".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        // The message stays generic; the source is for logs only.
        assert_eq!(err.message, "An internal error occurred");
    }

    #[test]
    fn validation_body_omits_errors_when_empty() {
        let body = ErrorResponse {
            code: "NOT_FOUND".to_string(),
            message: "Todo with id 1 not found".to_string(),
            errors: Vec::new(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("errors").is_none());
    }
}
