//! Route Configuration Module
//!
//! All HTTP routes of the PDF server are assembled in `router`.

/// Main router
pub mod router;
