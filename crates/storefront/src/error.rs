//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`, and every error body is JSON:
//!
//! ```json
//! { "error": "Invalid order payload", "detail": "missing required field: orderId" }
//! { "error": "Invalid contact payload", "fields": { "message": "..." } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use golden_crumb_core::FieldErrors;

use crate::db::RepositoryError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request body could not be read as the expected payload.
    #[error("Invalid {what} payload: {detail}")]
    InvalidPayload { what: &'static str, detail: String },

    /// The payload parsed but individual fields failed validation.
    #[error("Invalid {what} payload: {fields}")]
    Validation {
        what: &'static str,
        fields: FieldErrors,
    },

    /// Database read failed. Details are logged, not returned.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// A store write failed; the client sees `message` and the cause.
    #[error("{message}: {source}")]
    Persistence {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// A body that failed to parse.
    pub fn invalid(what: &'static str, detail: impl ToString) -> Self {
        Self::InvalidPayload {
            what,
            detail: detail.to_string(),
        }
    }

    /// Wrap a repository failure with the message shown to the client.
    #[must_use]
    pub const fn persistence(message: &'static str, source: RepositoryError) -> Self {
        Self::Persistence { message, source }
    }

    /// Map an axum JSON extraction failure to a 400 for `what`.
    #[must_use]
    pub fn from_json_rejection(what: &'static str, rejection: &JsonRejection) -> Self {
        Self::invalid(what, rejection.body_text())
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload { .. } | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl ErrorBody {
    /// Body with only an error message.
    #[must_use]
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
            fields: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }

        let body = match self {
            Self::InvalidPayload { what, detail } => ErrorBody {
                error: format!("Invalid {what} payload"),
                detail: Some(detail),
                fields: None,
            },
            Self::Validation { what, fields } => ErrorBody {
                error: format!("Invalid {what} payload"),
                detail: None,
                fields: Some(fields),
            },
            Self::Persistence { message, source } => ErrorBody {
                error: message.to_owned(),
                detail: Some(source.to_string()),
                fields: None,
            },
            Self::NotFound(what) => ErrorBody::message(format!("{what} not found")),
            // Don't expose internal error details to clients
            Self::Database(_) => ErrorBody::message("Internal server error"),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
