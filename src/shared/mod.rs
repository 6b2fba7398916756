//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the viewer and the PDF server. `PdfReference` travels over HTTP from the
//! server to the viewer, so everything here is serde-friendly.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code:
//! - The stored pointer to a book's PDF and the candidate URLs derived from it
//! - Viewer events emitted to the hosting page
//! - Error taxonomy for the delivery chain
//! - Viewer configuration

/// PDF reference and candidate URL types
pub mod pdf_reference;

/// Viewer events delivered to the host
pub mod event;

/// Shared error types
pub mod error;

/// Viewer configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use pdf_reference::{CandidateList, CandidateSource, CandidateUrl, PdfReference};
pub use event::{EmbedKind, ViewState, ViewerEvent};
pub use error::ViewerError;
pub use config::{ConfigError, ViewerConfig, ViewerConfigBuilder};
