/**
 * Server Initialization
 *
 * Builds the Axum application from a `ServerConfig`:
 * 1. Load the book catalog
 * 2. Create app state
 * 3. Create the router
 *
 * A missing catalog file is not fatal: the server starts with an empty
 * catalog so the streaming endpoint and static PDFs keep working. A catalog
 * file that exists but does not parse is an error.
 */

use axum::Router;
use crate::backend::books::BookCatalog;
use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
pub fn create_app(config: &ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing BookSansar PDF server");

    let catalog = if config.catalog_path.exists() {
        let catalog = BookCatalog::load(&config.catalog_path)?;
        tracing::info!(
            "Loaded {} book(s) from {}",
            catalog.len(),
            config.catalog_path.display()
        );
        catalog
    } else {
        tracing::warn!(
            "Catalog {} not found. PDF references will be unavailable.",
            config.catalog_path.display()
        );
        BookCatalog::new()
    };

    if !config.library_dir.is_dir() {
        tracing::warn!(
            "Library directory {} does not exist. Streaming will return 404.",
            config.library_dir.display()
        );
    }

    let app_state = AppState::new(
        catalog,
        config.library_dir.clone(),
        config.stream_path.as_str(),
    );
    let app = create_router(app_state, &config.public_pdf_dir);

    tracing::info!("Router configured");
    Ok(app)
}
