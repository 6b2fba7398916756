//! BookSansar - PDF Viewer Library
//!
//! BookSansar is an e-book store whose books are PDFs. This library holds the
//! part of it that gets a PDF onto the page: the delivery fallback chain that
//! tries several locations and embedding strategies in turn, plus the small
//! server that those locations point at.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between viewer and server
//!   - `PdfReference`, candidate URLs, viewer events
//!   - Error taxonomy and viewer configuration
//!
//! - **`viewer`** - Client side of the chain
//!   - URL resolver, render strategy selector, session driver
//!   - Diagnostic collector and download fallback
//!
//! - **`backend`** - PDF server (only compiled with `ssr` feature)
//!   - Streaming endpoint, static fallback PDFs, PDF references
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the Axum server and its binary
//! - **`probe`** - Enables the `pdf_probe` diagnostic binary
//!
//! # Usage
//!
//! ```rust
//! use booksansar::shared::{PdfReference, ViewerConfig};
//! use booksansar::viewer::PdfViewer;
//!
//! let config = ViewerConfig::builder().origin("https://site.test").build().unwrap();
//! let viewer = PdfViewer::new(config).unwrap();
//!
//! let candidates = viewer.candidates(&PdfReference::new("/files/a.pdf"));
//! assert_eq!(candidates.urls(), vec!["https://site.test/files/a.pdf"]);
//! ```
//!
//! # Threading
//!
//! A viewer session is single-threaded and event-driven: element callbacks
//! and timer expiries are processed one at a time by its driver loop. No
//! state is shared between sessions.

/// Shared types and data structures
pub mod shared;

/// Client-side PDF delivery chain
pub mod viewer;

/// PDF server
#[cfg(feature = "ssr")]
pub mod backend;

/// Debug invariant checks
pub mod debug;
