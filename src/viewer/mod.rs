//! # PDF Viewer
//!
//! Client side of the PDF delivery chain.
//!
//! ## Components
//!
//! - **`resolver`**: `PdfReference` → ordered candidate URLs
//! - **`selector`**: object-embed/iframe state machine over the candidates
//! - **`session`**: async driver for one open of the viewer
//! - **`diagnostics`**: reachability probes and the debug report
//! - **`download`**: direct download / new-tab fallback
//!
//! ## Usage
//!
//! ```rust,no_run
//! use booksansar::shared::{PdfReference, ViewerConfig};
//! use booksansar::viewer::{cancel::cancel_pair, surface::signal_channel, PdfViewer};
//! # async fn example<S: booksansar::viewer::surface::EmbedSurface + Send + 'static>(make_surface: impl Fn(booksansar::viewer::surface::SignalSender) -> S) {
//! let viewer = PdfViewer::new(ViewerConfig::default()).unwrap();
//! let reference = PdfReference::new("/files/a.pdf").with_book_id("b1");
//!
//! let (close, token) = cancel_pair();
//! let (signals_tx, signals_rx) = signal_channel();
//! let (session, mut events) = viewer.open(&reference, make_surface(signals_tx), signals_rx, token);
//! let task = tokio::spawn(session.run());
//!
//! while let Some(event) = events.recv().await {
//!     if event.is_terminal() {
//!         break;
//!     }
//! }
//! close.cancel();
//! let _report = task.await;
//! # }
//! ```

/// Cancellation token for sessions
pub mod cancel;

/// Reachability probes and debug report
pub mod diagnostics;

/// Direct download / new-tab fallback
pub mod download;

/// Connectivity flags for diagnostics
pub mod network_monitor;

/// Candidate URL resolution
pub mod resolver;

/// Render strategy state machine
pub mod selector;

/// Async session driver
pub mod session;

/// Embed surface abstraction
pub mod surface;

use crate::shared::config::{ConfigError, ViewerConfig};
use crate::shared::{CandidateList, PdfReference, ViewerError};
use cancel::CancelToken;
use diagnostics::{DiagnosticCollector, DiagnosticReport, EnvironmentInfo};
use download::{offer_download, DownloadAgent, DownloadOutcome, HttpDownloadAgent};
use resolver::UrlResolver;
use selector::{AttemptSnapshot, EventStream, StrategyTimeouts};
use session::ViewerSession;
use surface::{EmbedSurface, SignalReceiver};

/// Entry point used by hosting pages
///
/// Stateless between opens: every call to [`PdfViewer::open`] resolves the
/// reference afresh and builds a new session, which is also how a retry
/// works.
#[derive(Debug, Clone)]
pub struct PdfViewer {
    config: ViewerConfig,
    resolver: UrlResolver,
    diagnostics: DiagnosticCollector,
}

impl PdfViewer {
    pub fn new(config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let resolver = UrlResolver::from_config(&config)?;
        let diagnostics = DiagnosticCollector::new(config.probe_timeout());
        Ok(Self {
            config,
            resolver,
            diagnostics,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    pub fn candidates(&self, reference: &PdfReference) -> CandidateList {
        self.resolver.resolve(reference)
    }

    /// Build a session for one open of the view
    pub fn open<S: EmbedSurface>(
        &self,
        reference: &PdfReference,
        surface: S,
        signals: SignalReceiver,
        cancel: CancelToken,
    ) -> (ViewerSession<S>, EventStream) {
        let candidates = self.resolver.resolve(reference);
        ViewerSession::new(
            surface,
            signals,
            candidates,
            StrategyTimeouts::from_config(&self.config),
            cancel,
        )
    }

    /// Probe every candidate of `reference`
    pub async fn diagnose(
        &self,
        reference: &PdfReference,
        environment: EnvironmentInfo,
        attempt: Option<AttemptSnapshot>,
    ) -> DiagnosticReport {
        let candidates = self.resolver.resolve(reference);
        self.diagnostics.collect(&candidates, environment, attempt).await
    }

    /// Download fallback with a caller-supplied agent
    pub async fn download_with<A: DownloadAgent>(
        &self,
        reference: &PdfReference,
        agent: &A,
    ) -> Result<DownloadOutcome, ViewerError> {
        let candidates = self.resolver.resolve(reference);
        offer_download(&candidates, reference.book_title.as_deref(), agent).await
    }

    /// Download fallback into the configured download directory
    pub async fn download(&self, reference: &PdfReference) -> Result<DownloadOutcome, ViewerError> {
        let agent = HttpDownloadAgent::new(self.config.download_dir())
            .with_timeout(self.config.download_timeout());
        self.download_with(reference, &agent).await
    }
}
