//! Backend Module
//!
//! The PDF server the viewer's candidate URLs point at. Only compiled with
//! the `ssr` feature.
//!
//! - **`server`** - configuration, state and app creation
//! - **`routes`** - router assembly
//! - **`books`** - catalog and PDF handlers
//! - **`error`** - backend errors and their HTTP responses

/// Book catalog and handlers
pub mod books;

/// Backend error types
pub mod error;

/// Route configuration
pub mod routes;

/// Server setup
pub mod server;
