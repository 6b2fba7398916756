//! Backend Error Module
//!
//! This module defines error types specific to the PDF server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # HTTP Response Conversion
//!
//! All backend errors implement `IntoResponse` from Axum, allowing them to be
//! returned directly from handlers as a JSON body:
//!
//! ```json
//! { "error": "Book not found: b1", "status": 404 }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
