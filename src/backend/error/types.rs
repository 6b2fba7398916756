/**
 * Backend Error Types
 *
 * This module defines error types specific to the PDF server.
 *
 * # Error Types
 *
 * - `HandlerError` - invalid request (bad book id, ...)
 * - `NotFound` - unknown book or missing file
 * - `CatalogError` - the book catalog could not be loaded
 * - `IoError` - filesystem failure while serving
 */

use thiserror::Error;
use axum::http::StatusCode;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use booksansar::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid book id");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., malformed path parameter)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Requested resource does not exist
    #[error("{what} not found: {id}")]
    NotFound {
        what: &'static str,
        id: String,
    },

    /// Catalog loading or parsing failed
    #[error("Catalog error: {message}")]
    CatalogError {
        message: String,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(what: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            id: id.into(),
        }
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::CatalogError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `NotFound` - 404 Not Found
    /// - `CatalogError`, `IoError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::CatalogError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::NotFound { .. } => self.to_string(),
            Self::CatalogError { message } => message.clone(),
            // Internal paths stay in the log
            Self::IoError(_) => "Internal server error".to_string(),
        }
    }
}
