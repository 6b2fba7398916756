//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server that backs the
//! viewer's candidate URLs.
//!
//! # Architecture
//!
//! - **`state`** - `AppState` shared by handlers
//! - **`config`** - Environment-based configuration
//! - **`init`** - App creation
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Catalog Loading**: book catalog from `CATALOG_PATH`, empty if missing
//! 3. **Router Creation**: API routes, static fallback PDFs, 404 handler
//!
//! # Example
//!
//! ```rust,no_run
//! use booksansar::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() {
//! let app = create_app(&ServerConfig::from_env()).unwrap();
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use state::AppState;
pub use init::create_app;
