//! API error types for handler operations
//!
//! Every failed request is rendered as either `{ "errors": [...] }` (rule
//! violations) or `{ "error": "..." }` (everything else).
//!
//! # Example
//!
//! ```rust
//! use products_api::handlers::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::not_found(7);
//! assert!(matches!(error.kind, ApiErrorKind::NotFound));
//! assert_eq!(error.message, "Product not found");
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ErrorResponse;
use crate::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
use crate::validation::ValidationError;

/// Operation being performed when the API error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Listing products
    List,
    /// Getting a single product by ID
    Get,
    /// Creating a new product
    Create,
    /// Replacing a product's fields
    Update,
    /// Toggling a product's availability
    ToggleAvailability,
    /// Deleting a product
    Delete,
    /// Readiness check
    Ready,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::ToggleAvailability => write!(f, "toggle_availability"),
            Self::Delete => write!(f, "delete"),
            Self::Ready => write!(f, "ready"),
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Product was not found
    NotFound,
    /// One or more request rules failed
    ValidationFailed,
    /// Request could not be read (malformed JSON, bad path)
    BadRequest,
    /// Request body exceeded the configured limit
    PayloadTooLarge,
    /// Internal server error
    InternalError,
    /// Service temporarily unavailable
    ServiceUnavailable,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::PayloadTooLarge => write!(f, "payload_too_large"),
            Self::InternalError => write!(f, "internal_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ValidationFailed | Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Structured API error with operation context
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// The operation being performed when the error occurred
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The ID of the product involved
    pub product_id: Option<i64>,
    /// Failed rules, in declaration order (only for `ValidationFailed`)
    pub errors: Vec<ValidationError>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            product_id: None,
            errors: Vec::new(),
        }
    }

    /// The product does not exist
    pub fn not_found(id: i64) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::NotFound, "Product not found").with_product(id)
    }

    /// An id that is a well-formed integer but cannot name a stored product
    pub fn unknown_id() -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::NotFound, "Product not found")
    }

    /// One or more request rules failed
    pub fn validation_failed(errors: Vec<ValidationError>) -> Self {
        let mut error = Self::new(
            ApiOperation::Create,
            ApiErrorKind::ValidationFailed,
            format!("{} validation error(s)", errors.len()),
        );
        error.errors = errors;
        error
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Create, ApiErrorKind::BadRequest, message)
    }

    /// Attach the product involved
    #[must_use]
    pub fn with_product(mut self, id: i64) -> Self {
        self.product_id = Some(id);
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(self.kind, ApiErrorKind::ServiceUnavailable)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(id) = self.product_id {
            write!(f, " [Product: {}]", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Response body for rule violations
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<ValidationError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        match self.kind {
            ApiErrorKind::InternalError | ApiErrorKind::ServiceUnavailable => {
                tracing::error!(
                    operation = %self.operation,
                    kind = %self.kind,
                    product_id = ?self.product_id,
                    retriable = self.is_retriable(),
                    "API error: {}", self.message
                );
            }
            _ => {
                tracing::warn!(
                    operation = %self.operation,
                    kind = %self.kind,
                    product_id = ?self.product_id,
                    "API error: {}", self.message
                );
            }
        }

        if self.kind == ApiErrorKind::ValidationFailed {
            let body = ValidationErrorResponse {
                errors: self.errors,
            };
            return (status, Json(body)).into_response();
        }

        (status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

/// Convert RepositoryOperation to ApiOperation
fn repository_operation_to_api_operation(op: RepositoryOperation) -> ApiOperation {
    match op {
        RepositoryOperation::FindAll => ApiOperation::List,
        RepositoryOperation::FindById => ApiOperation::Get,
        RepositoryOperation::Create => ApiOperation::Create,
        RepositoryOperation::Save => ApiOperation::Update,
        RepositoryOperation::Destroy => ApiOperation::Delete,
        RepositoryOperation::Ping | RepositoryOperation::Migrate => ApiOperation::Ready,
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let operation = repository_operation_to_api_operation(err.operation);

        let kind = match err.kind {
            RepositoryErrorKind::NotFound => ApiErrorKind::NotFound,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout => {
                ApiErrorKind::ServiceUnavailable
            }
            RepositoryErrorKind::ConstraintViolation
            | RepositoryErrorKind::DatabaseError
            | RepositoryErrorKind::Other => ApiErrorKind::InternalError,
        };

        // Internal details stay in the logs
        tracing::debug!(error = %err, "Repository error mapped to API error");
        let message = match kind {
            ApiErrorKind::NotFound => "Product not found",
            ApiErrorKind::ServiceUnavailable => "Service temporarily unavailable",
            _ => "An internal error occurred",
        };

        Self {
            operation,
            kind,
            message: message.to_string(),
            product_id: err.product_id,
            errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Location;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiErrorKind::ValidationFailed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiErrorKind::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiErrorKind::ServiceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_display_includes_product() {
        let error = ApiError::not_found(12).with_operation(ApiOperation::Delete);
        assert_eq!(
            error.to_string(),
            "API not_found error during delete: Product not found [Product: 12]"
        );
    }

    #[test]
    fn test_validation_failed_keeps_errors() {
        let error = ApiError::validation_failed(vec![ValidationError::new(
            Location::Params,
            "id",
            None,
            "ID not valid",
        )]);
        assert_eq!(error.errors.len(), 1);
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_from_repository_not_found() {
        let error: ApiError = RepositoryError::not_found(RepositoryOperation::Save, 3).into();
        assert_eq!(error.kind, ApiErrorKind::NotFound);
        assert_eq!(error.operation, ApiOperation::Update);
        assert_eq!(error.message, "Product not found");
        assert_eq!(error.product_id, Some(3));
    }

    #[test]
    fn test_from_repository_hides_internals() {
        let error: ApiError =
            RepositoryError::database_error(RepositoryOperation::FindAll, "relation missing").into();
        assert_eq!(error.kind, ApiErrorKind::InternalError);
        assert_eq!(error.message, "An internal error occurred");

        let error: ApiError = RepositoryError::connection_failed("refused").into();
        assert!(error.is_retriable());
    }
}
