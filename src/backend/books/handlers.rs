/**
 * Book PDF Handlers
 *
 * - `GET|HEAD /api/books/{id}/stream` - the book's PDF from the library
 *   directory. Range requests and `HEAD` are handled by tower-http's
 *   `ServeFile`, which is what the viewer's reachability probe relies on.
 * - `GET /api/books/{id}/pdf-reference` - the `PdfReference` the viewer
 *   resolves candidates from.
 */

use crate::backend::books::catalog::is_valid_book_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::PdfReference;
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

fn check_book_id(id: &str) -> Result<(), BackendError> {
    if is_valid_book_id(id) {
        Ok(())
    } else {
        Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            format!("Invalid book id: {:?}", id),
        ))
    }
}

/// Stream a book's PDF
pub async fn handle_stream_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Response, BackendError> {
    check_book_id(&id)?;

    let path = state.library_dir.join(format!("{}.pdf", id));
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(BackendError::not_found("PDF", id)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BackendError::not_found("PDF", id));
        }
        Err(e) => return Err(e.into()),
    }

    tracing::debug!("[Server] {} {}", request.method(), path.display());
    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    Ok(response.into_response())
}

/// Look up the viewer reference for a book
pub async fn handle_pdf_reference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PdfReference>, BackendError> {
    check_book_id(&id)?;
    let entry = state
        .catalog
        .get(&id)
        .ok_or_else(|| BackendError::not_found("Book", id.clone()))?;
    Ok(Json(entry.pdf_reference(&state.stream_path)))
}
