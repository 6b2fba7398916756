//! PDF server tests
//!
//! Router-level requests go through `tower::ServiceExt::oneshot`; the last
//! test binds a real listener and points the viewer's probes at it.

#![cfg(feature = "ssr")]

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use booksansar::backend::server::config::ServerConfig;
use booksansar::backend::server::create_app;
use booksansar::shared::{CandidateSource, PdfReference, ViewerConfig};
use booksansar::viewer::diagnostics::EnvironmentInfo;
use booksansar::viewer::PdfViewer;
use common::PDF_BYTES;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tower::ServiceExt;

const CATALOG: &str = r#"
[[book]]
id = "muna-madan"
title = "Muna Madan"

[[book]]
id = "seto-bagh"
title = "Seto Bagh"
pdf_url = "https://cdn.site.test/seto-bagh.pdf"
"#;

/// Library with one streamable book, one static PDF and a catalog
fn fixture() -> (TempDir, ServerConfig) {
    let root = tempfile::tempdir().unwrap();
    let library_dir = root.path().join("library");
    let public_pdf_dir = root.path().join("public");
    std::fs::create_dir_all(&library_dir).unwrap();
    std::fs::create_dir_all(&public_pdf_dir).unwrap();
    std::fs::write(library_dir.join("muna-madan.pdf"), PDF_BYTES).unwrap();
    std::fs::write(public_pdf_dir.join("seto-bagh.pdf"), PDF_BYTES).unwrap();
    let catalog_path = root.path().join("books.toml");
    std::fs::write(&catalog_path, CATALOG).unwrap();

    let config = ServerConfig {
        port: 0,
        library_dir,
        public_pdf_dir,
        catalog_path,
        ..ServerConfig::default()
    };
    (root, config)
}

fn app(config: &ServerConfig) -> Router {
    crate::assert_ok!(create_app(config))
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

#[tokio::test]
async fn test_stream_serves_pdf() {
    let (_root, config) = fixture();
    let (status, headers, body) =
        send(app(&config), Method::GET, "/api/books/muna-madan/stream").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(body, PDF_BYTES);
}

#[tokio::test]
async fn test_stream_answers_head_without_body() {
    let (_root, config) = fixture();
    let (status, headers, body) =
        send(app(&config), Method::HEAD, "/api/books/muna-madan/stream").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_LENGTH],
        PDF_BYTES.len().to_string().as_str()
    );
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_stream_supports_ranges() {
    let (_root, config) = fixture();
    let request = Request::builder()
        .uri("/api/books/muna-madan/stream")
        .header(header::RANGE, "bytes=0-7")
        .body(Body::empty())
        .unwrap();
    let response = app(&config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], &PDF_BYTES[..8]);
}

#[tokio::test]
async fn test_stream_rejects_bad_id() {
    let (_root, config) = fixture();
    let (status, _, body) = send(app(&config), Method::GET, "/api/books/a.b/stream").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_stream_missing_book_is_json_404() {
    let (_root, config) = fixture();
    let (status, _, body) = send(app(&config), Method::GET, "/api/books/nope/stream").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], 404);
    crate::assert_contains!(json["error"].as_str().unwrap(), "nope");
}

#[tokio::test]
async fn test_pdf_reference_endpoint() {
    let (_root, config) = fixture();

    let (status, _, body) =
        send(app(&config), Method::GET, "/api/books/muna-madan/pdf-reference").await;
    assert_eq!(status, StatusCode::OK);
    let reference: PdfReference = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        reference,
        PdfReference::new("/api/books/muna-madan/stream")
            .with_book_id("muna-madan")
            .with_book_title("Muna Madan")
    );

    let (status, _, body) =
        send(app(&config), Method::GET, "/api/books/seto-bagh/pdf-reference").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["primaryUrl"], "https://cdn.site.test/seto-bagh.pdf");
    assert_eq!(json["bookId"], "seto-bagh");

    let (status, _, _) = send(app(&config), Method::GET, "/api/books/unknown/pdf-reference").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pdf_reference_uses_configured_stream_path() {
    let (_root, mut config) = fixture();
    config.stream_path = "/v1/api/books/{id}/stream".to_string();

    let (status, _, body) =
        send(app(&config), Method::GET, "/api/books/muna-madan/pdf-reference").await;
    assert_eq!(status, StatusCode::OK);
    let reference: PdfReference = serde_json::from_slice(&body).unwrap();
    assert_eq!(reference.primary_url, "/v1/api/books/muna-madan/stream");

    // a viewer on the same template sees primary and streaming as one candidate
    let viewer = PdfViewer::new(
        ViewerConfig::builder()
            .origin("https://site.test")
            .stream_path("/v1/api/books/{id}/stream")
            .build()
            .unwrap(),
    )
    .unwrap();
    let candidates = viewer.candidates(&reference);
    assert_eq!(
        candidates.urls(),
        vec![
            "https://site.test/v1/api/books/muna-madan/stream",
            "https://site.test/pdfs/muna-madan.pdf",
        ]
    );
}

#[tokio::test]
async fn test_static_pdfs_and_health() {
    let (_root, config) = fixture();

    let (status, _, body) = send(app(&config), Method::GET, "/pdfs/seto-bagh.pdf").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PDF_BYTES);

    let (status, _, _) = send(app(&config), Method::GET, "/pdfs/missing.pdf").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(app(&config), Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    let (status, _, body) = send(app(&config), Method::GET, "/somewhere/else").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_missing_catalog_starts_empty() {
    let (root, mut config) = fixture();
    config.catalog_path = root.path().join("absent.toml");

    let (status, _, _) =
        send(app(&config), Method::GET, "/api/books/muna-madan/pdf-reference").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // streaming does not depend on the catalog
    let (status, _, _) = send(app(&config), Method::GET, "/api/books/muna-madan/stream").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_broken_catalog_is_an_error() {
    let (root, mut config) = fixture();
    let broken = root.path().join("broken.toml");
    std::fs::write(&broken, "[[book]]\nid = 5\n").unwrap();
    config.catalog_path = broken;

    assert!(create_app(&config).is_err());
}

#[tokio::test]
async fn test_viewer_probes_a_running_server() {
    let (_root, config) = fixture();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app(&config);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let viewer = PdfViewer::new(
        ViewerConfig::builder()
            .origin(format!("http://{}", addr))
            .build()
            .unwrap(),
    )
    .unwrap();

    // primary is stale, the streaming endpoint and the static file both exist
    let reference = PdfReference::new("/files/old-location.pdf")
        .with_book_id("muna-madan")
        .with_book_title("Seto Bagh");
    let report = viewer
        .diagnose(&reference, EnvironmentInfo::default(), None)
        .await;

    let outcome: Vec<(CandidateSource, bool)> = report
        .probes
        .iter()
        .map(|probe| (probe.source, probe.reachable))
        .collect();
    assert_eq!(
        outcome,
        vec![
            (CandidateSource::Primary, false),
            (CandidateSource::Streaming, true),
            (CandidateSource::LocalFallback, true),
        ]
    );
    assert_eq!(
        report.first_reachable().map(|p| p.url.clone()),
        Some(format!("http://{}/api/books/muna-madan/stream", addr))
    );
}
