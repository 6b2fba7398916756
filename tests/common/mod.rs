//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A scripted embed surface
//! - Mock PDF server helpers
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod mock_server;
pub mod mock_surface;

// Re-export commonly used utilities
pub use mock_server::*;
pub use mock_surface::*;
