//! Books Module
//!
//! The book catalog and the handlers that serve book PDFs.

/// Catalog of known books
pub mod catalog;

/// HTTP handlers
pub mod handlers;

pub use catalog::{BookCatalog, BookEntry};
