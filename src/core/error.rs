//! Typed error handling for the agrilink backend
//!
//! Every handler returns `Result<_, ApiError>`; the `IntoResponse`
//! implementation turns each variant into the JSON error body the HTTP
//! surface promises: always a `message` field, plus a field-keyed `errors`
//! map for validation failures.
//!
//! # Error Categories
//!
//! - [`ApiError::Validation`]: missing/malformed required fields (400)
//! - [`ApiError::Duplicate`]: unique-field collision, e.g. `orderId` (400)
//! - [`ApiError::NotFound`]: no record for the given identifier (404)
//! - [`ApiError::InvalidStatus`]: status outside the canonical set (400)
//! - [`ApiError::Storage`] / [`ApiError::Internal`]: unexpected failures,
//!   reported as a generic 500 with no detail leakage

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use crate::core::validation::FieldErrors;
use crate::storage::StoreError;

/// The main error type for the agrilink HTTP surface
#[derive(Debug)]
pub enum ApiError {
    /// One or more fields failed validation
    Validation(FieldErrors),

    /// A unique field collided with an existing record
    Duplicate { resource: String, field: String },

    /// No record exists for the given identifier
    NotFound { resource: String },

    /// A delivery status outside the canonical four-value set
    InvalidStatus { value: String },

    /// Storage backend failure
    Storage(StoreError),

    /// Unexpected internal failure
    Internal(String),
}

impl ApiError {
    /// Not-found error for a resource named in lowercase ("delivery order").
    pub fn not_found(resource: &str) -> Self {
        ApiError::NotFound {
            resource: resource.to_string(),
        }
    }

    /// Duplicate-value error naming the resource and the colliding field.
    pub fn duplicate(resource: &str, field: &str) -> Self {
        ApiError::Duplicate {
            resource: resource.to_string(),
            field: field.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidStatus { .. } => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the machine-readable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Duplicate { .. } => "DUPLICATE_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::InvalidStatus { .. } => "INVALID_STATUS",
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to the JSON body sent to the client.
    ///
    /// Storage and internal failures collapse to a generic message; the
    /// detail stays in the server log only.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            ApiError::Storage(_) | ApiError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let errors = match self {
            ApiError::Validation(errors) => Some(errors.clone()),
            _ => None,
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            errors,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(_) => write!(f, "Validation failed"),
            ApiError::Duplicate { resource, field } => {
                write!(
                    f,
                    "{} with this {} already exists",
                    capitalized(resource),
                    field
                )
            }
            ApiError::NotFound { resource } => {
                write!(f, "{} not found", capitalized(resource))
            }
            ApiError::InvalidStatus { value } => {
                write!(f, "Invalid status value: '{}'", value)
            }
            ApiError::Storage(err) => write!(f, "Storage error: {}", err),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-keyed validation messages, present only for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // A duplicate surfacing without handler context still maps to
            // the 400-class duplicate error, not a generic 500.
            StoreError::Duplicate { field } => ApiError::Duplicate {
                resource: "record".to_string(),
                field,
            },
            other => ApiError::Storage(other),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// A specialized Result type for handler and service operations
pub type ApiResult<T> = Result<T, ApiError>;
