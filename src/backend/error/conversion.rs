/**
 * Error Conversion
 *
 * `IntoResponse` for backend errors. Responses are JSON:
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("[Server] {}", self);
        } else {
            tracing::debug!("[Server] {}", self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_into_response_json() {
        let response = BackendError::not_found("Book", "b9").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Book not found: b9");
        assert_eq!(body["status"], 404);
    }
}
