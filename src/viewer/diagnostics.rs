//! # Diagnostic Collector
//!
//! Builds the debug report shown when a PDF will not display. Every
//! candidate gets one `HEAD` request, all in parallel, each with its own
//! timeout. Probe failures are recorded, never retried, and never touch the
//! render chain.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use booksansar::viewer::diagnostics::{DiagnosticCollector, EnvironmentInfo};
//! # async fn example(candidates: booksansar::shared::CandidateList) {
//! let collector = DiagnosticCollector::new(std::time::Duration::from_secs(5));
//! let report = collector.collect(&candidates, EnvironmentInfo::default(), None).await;
//! println!("{}", report.to_text());
//! # }
//! ```

use crate::shared::{CandidateList, CandidateSource, ViewerError};
use crate::viewer::network_monitor::NetworkFlags;
use crate::viewer::selector::AttemptSnapshot;
use futures_util::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::{Duration, Instant};

/// Width and height in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Static facts about the hosting environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    pub viewport: Option<Dimensions>,
    /// `None` when the container element does not exist
    pub container: Option<Dimensions>,
    pub network: NetworkFlags,
    pub user_agent: Option<String>,
}

/// Result of probing one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub url: String,
    pub source: CandidateSource,
    pub reachable: bool,
    pub status: Option<u16>,
    pub content_type: Option<String>,
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

/// On-demand snapshot, never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub generated_at: String,
    pub environment: EnvironmentInfo,
    pub probes: Vec<ProbeResult>,
    pub attempt: Option<AttemptSnapshot>,
}

impl DiagnosticReport {
    pub fn reachable_count(&self) -> usize {
        self.probes.iter().filter(|p| p.reachable).count()
    }

    /// First candidate that answered the probe
    pub fn first_reachable(&self) -> Option<&ProbeResult> {
        self.probes.iter().find(|p| p.reachable)
    }

    /// Plain-text rendering for the debug panel
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "PDF diagnostics ({})", self.generated_at);

        let env = &self.environment;
        match env.viewport {
            Some(d) => {
                let _ = writeln!(out, "Viewport: {}x{}", d.width, d.height);
            }
            None => out.push_str("Viewport: unknown\n"),
        }
        match env.container {
            Some(d) => {
                let _ = writeln!(out, "Container: {}x{}", d.width, d.height);
            }
            None => out.push_str("Container: missing\n"),
        }
        let _ = writeln!(
            out,
            "Network: {:?}{}{}",
            env.network.status,
            env.network
                .connection_type
                .as_deref()
                .map(|t| format!(" ({})", t))
                .unwrap_or_default(),
            if env.network.save_data { ", save-data" } else { "" }
        );
        if let Some(agent) = &env.user_agent {
            let _ = writeln!(out, "User agent: {}", agent);
        }

        if let Some(attempt) = &self.attempt {
            let _ = writeln!(
                out,
                "Render state: {:?} after {} attempt(s)",
                attempt.state, attempt.attempts_made
            );
            if let (Some(url), Some(strategy), Some(status)) =
                (&attempt.url, attempt.strategy, attempt.status)
            {
                let _ = writeln!(out, "Current attempt: {} via {} ({:?})", url, strategy, status);
            }
        }

        let _ = writeln!(
            out,
            "Candidates: {} of {} reachable",
            self.reachable_count(),
            self.probes.len()
        );
        for (index, probe) in self.probes.iter().enumerate() {
            let outcome = if probe.reachable { "OK" } else { "FAIL" };
            let _ = write!(out, "  {}. [{}] {} {}", index + 1, probe.source, probe.url, outcome);
            if let Some(status) = probe.status {
                let _ = write!(out, " HTTP {}", status);
            }
            if let Some(error) = &probe.error {
                let _ = write!(out, " - {}", error);
            }
            let _ = writeln!(out, " ({}ms)", probe.elapsed_ms);
        }
        out
    }
}

/// Probes candidate URLs for the debug report
#[derive(Debug, Clone)]
pub struct DiagnosticCollector {
    client: Client,
    timeout: Duration,
}

impl DiagnosticCollector {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(Client::new(), timeout)
    }

    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Probe every candidate and assemble a report
    pub async fn collect(
        &self,
        candidates: &CandidateList,
        environment: EnvironmentInfo,
        attempt: Option<AttemptSnapshot>,
    ) -> DiagnosticReport {
        tracing::info!("[Diagnostics] Probing {} candidate(s)", candidates.len());
        let probes = join_all(
            candidates
                .iter()
                .map(|candidate| self.probe(candidate.as_str(), candidate.source)),
        )
        .await;

        DiagnosticReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            environment,
            probes,
            attempt,
        }
    }

    /// Existence check against one URL
    pub async fn probe(&self, url: &str, source: CandidateSource) -> ProbeResult {
        let started = Instant::now();
        let response = self.client.head(url).timeout(self.timeout).send().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match response {
            Ok(response) => {
                let status = response.status();
                let content_type = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let reachable = status.is_success();
                let error = (!reachable)
                    .then(|| ViewerError::unreachable(url, format!("HTTP {}", status)).to_string());
                if let Some(error) = &error {
                    tracing::warn!("[Diagnostics] {}", error);
                }
                ProbeResult {
                    url: url.to_string(),
                    source,
                    reachable,
                    status: Some(status.as_u16()),
                    content_type,
                    error,
                    elapsed_ms,
                }
            }
            Err(e) => {
                let reason = if e.is_timeout() {
                    format!("timed out after {}ms", self.timeout.as_millis())
                } else if e.is_builder() {
                    "invalid URL".to_string()
                } else {
                    e.to_string()
                };
                let error = ViewerError::unreachable(url, reason);
                tracing::warn!("[Diagnostics] {}", error);
                ProbeResult {
                    url: url.to_string(),
                    source,
                    reachable: false,
                    status: None,
                    content_type: None,
                    error: Some(error.to_string()),
                    elapsed_ms,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ViewState;
    use crate::viewer::network_monitor::NetworkStatus;

    fn report(probes: Vec<ProbeResult>) -> DiagnosticReport {
        DiagnosticReport {
            generated_at: "2026-01-01T00:00:00Z".to_string(),
            environment: EnvironmentInfo {
                viewport: Some(Dimensions::new(1280, 720)),
                container: None,
                network: NetworkFlags {
                    status: NetworkStatus::Limited,
                    connection_type: Some("3g".to_string()),
                    save_data: true,
                },
                user_agent: None,
            },
            probes,
            attempt: Some(AttemptSnapshot {
                state: ViewState::Exhausted,
                attempts_made: 2,
                ..AttemptSnapshot::default()
            }),
        }
    }

    fn probe(url: &str, reachable: bool) -> ProbeResult {
        ProbeResult {
            url: url.to_string(),
            source: CandidateSource::Primary,
            reachable,
            status: Some(if reachable { 200 } else { 404 }),
            content_type: None,
            error: (!reachable).then(|| "Unreachable: HTTP 404".to_string()),
            elapsed_ms: 4,
        }
    }

    #[test]
    fn test_text_rendering() {
        let text = report(vec![probe("https://a.test/1.pdf", false), probe("https://a.test/2.pdf", true)])
            .to_text();
        assert!(text.contains("Viewport: 1280x720"));
        assert!(text.contains("Container: missing"));
        assert!(text.contains("Limited (3g), save-data"));
        assert!(text.contains("Exhausted after 2 attempt(s)"));
        assert!(text.contains("1 of 2 reachable"));
        assert!(text.contains("https://a.test/1.pdf FAIL HTTP 404"));
    }

    #[test]
    fn test_first_reachable() {
        let report = report(vec![probe("https://a.test/1.pdf", false), probe("https://a.test/2.pdf", true)]);
        assert_eq!(report.first_reachable().unwrap().url, "https://a.test/2.pdf");
    }

    #[tokio::test]
    async fn test_malformed_url_recorded_not_raised() {
        let collector = DiagnosticCollector::new(Duration::from_millis(200));
        let result = collector.probe("not a url", CandidateSource::LocalFallback).await;
        assert!(!result.reachable);
        assert_eq!(result.status, None);
        assert!(result.error.unwrap().contains("not a url"));
    }
}
