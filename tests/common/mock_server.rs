//! Mock server helpers for integration tests
//!
//! Wraps wiremock with the handful of PDF-server behaviours the viewer
//! cares about.

use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Minimal bytes that look like a PDF
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n%test\n1 0 obj<<>>endobj\ntrailer<<>>\n%%EOF\n";

/// Serve `PDF_BYTES` for GET and HEAD at `route`
pub async fn mount_pdf(server: &MockServer, route: &str) {
    for verb in ["GET", "HEAD"] {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/pdf")
                    .set_body_bytes(PDF_BYTES),
            )
            .mount(server)
            .await;
    }
}

/// Respond to any method at `route` with `status`
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Respond at `route` only after `delay`
pub async fn mount_slow(server: &MockServer, route: &str, delay: Duration) {
    Mock::given(path(route))
        .respond_with(ResponseTemplate::new(200).set_delay(delay))
        .mount(server)
        .await;
}
