//! Router Configuration
//!
//! # Routes
//!
//! - `GET /health` - liveness probe
//! - `GET|HEAD /api/books/{id}/stream` - book PDF (streaming candidate)
//! - `GET /api/books/{id}/pdf-reference` - viewer reference for a book
//! - `/pdfs/*` - static PDFs (filename-guess candidate)
//! - fallback - 404 JSON

use axum::{routing::get, Router};
use crate::backend::books::handlers::{handle_pdf_reference, handle_stream_pdf};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use std::path::Path;
use tower_http::services::ServeDir;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, public_pdf_dir: &Path) -> Router<()> {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/books/{id}/stream", get(handle_stream_pdf))
        .route("/api/books/{id}/pdf-reference", get(handle_pdf_reference))
        .nest_service("/pdfs", ServeDir::new(public_pdf_dir))
        .fallback(|| async { BackendError::not_found("Route", "requested path") })
        .with_state(app_state)
}
