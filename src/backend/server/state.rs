/**
 * Application State Management
 *
 * `AppState` is the state shared by every handler:
 * - the book catalog, read-only after startup
 * - the library directory PDFs are streamed from
 * - the public streaming path template
 *
 * Both live behind `Arc` so cloning the state per request is cheap.
 *
 * # Example
 *
 * ```rust,no_run
 * use booksansar::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let known = state.catalog.len();
 * }
 * ```
 */

use crate::backend::books::BookCatalog;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Books by id
    pub catalog: Arc<BookCatalog>,
    /// Directory holding `<book id>.pdf` files
    pub library_dir: Arc<PathBuf>,
    /// Streaming path template handed out in PDF references
    pub stream_path: Arc<str>,
}

impl AppState {
    pub fn new(
        catalog: BookCatalog,
        library_dir: PathBuf,
        stream_path: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            library_dir: Arc::new(library_dir),
            stream_path: stream_path.into(),
        }
    }
}
