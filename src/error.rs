//! Application error type and its HTTP representation.
//!
//! Every failure the shortening engine and the resolver can report is a
//! variant of [`AppError`]. Input errors are detected before the store is
//! touched; store failures are wrapped so callers can tell a uniqueness
//! conflict on write apart from a backend outage on read.
//!
//! # Response Format
//!
//! ```json
//! {
//!   "error": {
//!     "code": "malformed_url",
//!     "message": "Malformed URL",
//!     "details": { "reason": "Invalid URL format: relative URL without a base" }
//!   }
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description included in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The shorten request carried no URL.
    #[error("URL not provided")]
    MissingInput,

    /// The submitted URL failed the well-formed URL predicate.
    #[error("Malformed URL")]
    MalformedUrl { reason: String },

    /// The resolve request carried no short code.
    #[error("Short code not provided")]
    MissingCode,

    /// The short code does not have the configured length and alphabet.
    #[error("Malformed short code")]
    MalformedCode { code: String },

    /// The store refused to persist a new mapping.
    #[error("Unable to store URL")]
    PersistenceFailure {
        #[source]
        source: StoreError,
    },

    /// The store failed while serving a lookup.
    #[error("Storage error")]
    Storage(#[from] StoreError),

    /// The request body could not be read.
    #[error("{message}")]
    BadRequest { message: String, details: Value },
}

impl AppError {
    pub fn malformed_url(reason: impl Into<String>) -> Self {
        Self::MalformedUrl {
            reason: reason.into(),
        }
    }

    pub fn malformed_code(code: impl Into<String>) -> Self {
        Self::MalformedCode { code: code.into() }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::BadRequest {
            message: message.into(),
            details,
        }
    }

    /// Stable identifier used as `error.code` in responses.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingInput => "missing_input",
            AppError::MalformedUrl { .. } => "malformed_url",
            AppError::MissingCode => "missing_code",
            AppError::MalformedCode { .. } => "malformed_code",
            AppError::PersistenceFailure { .. } => "persistence_failure",
            AppError::Storage(_) => "storage_error",
            AppError::BadRequest { .. } => "bad_request",
        }
    }

    /// HTTP status the error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingInput
            | AppError::MalformedUrl { .. }
            | AppError::MissingCode
            | AppError::MalformedCode { .. }
            | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::PersistenceFailure { .. } | AppError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn details(&self) -> Value {
        match self {
            AppError::MissingInput | AppError::MissingCode => json!({}),
            AppError::MalformedUrl { reason } => json!({ "reason": reason }),
            AppError::MalformedCode { code } => json!({ "code": code }),
            AppError::PersistenceFailure { source } => match source {
                StoreError::ConstraintViolation { field } => json!({ "constraint": field }),
                StoreError::ValidationFailure { field, .. } => json!({ "field": field }),
                StoreError::Backend(_) => json!({}),
            },
            // Backend messages may leak connection details.
            AppError::Storage(_) => json!({}),
            AppError::BadRequest { details, .. } => details.clone(),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details: self.details(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            match &self {
                AppError::PersistenceFailure { source } | AppError::Storage(source) => {
                    tracing::error!(error = %source, "{}", self);
                }
                _ => tracing::error!("{}", self),
            }
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
