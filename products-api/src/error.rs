//! Error types
//!
//! [`Error`] covers process-level failures (configuration, I/O, database
//! bootstrap) and propagates out of `main`. Per-request failures are modelled
//! by [`ApiError`](crate::handlers::ApiError), which renders [`ErrorResponse`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::RepositoryError;

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Repository error raised outside a request (schema bootstrap, readiness)
    #[error("{0}")]
    Repository(RepositoryError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        Error::Repository(err)
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Repository(RepositoryError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryOperation;

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::new("boom");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "boom" }));
    }

    #[test]
    fn test_repository_error_display() {
        let err: Error =
            RepositoryError::database_error(RepositoryOperation::Migrate, "permission denied")
                .into();
        assert_eq!(
            err.to_string(),
            "Repository database_error error during migrate: permission denied"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err: Error = figment::Error::from("missing field `url`".to_string()).into();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
