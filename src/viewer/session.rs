//! # Viewer Session
//!
//! Async driver for one open of the viewer. It owns a [`RenderSelector`] and
//! processes, one at a time, the three things that can move it:
//!
//! - element callbacks arriving from the surface
//! - expiry of the current attempt's deadline
//! - cancellation of the hosting view
//!
//! The session keeps running after `Loaded`/`Exhausted` so the rendered
//! element stays attached; it ends only when the view is closed.

use crate::shared::{CandidateList, ViewState, ViewerError};
use crate::viewer::cancel::CancelToken;
use crate::viewer::selector::{AttemptSnapshot, EventStream, RenderSelector, StrategyTimeouts};
use crate::viewer::surface::{EmbedSurface, SignalReceiver, SurfaceSignal};
use tokio::time::{sleep_until, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Summary returned when a session ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub session_id: Uuid,
    /// Last state before teardown
    pub final_state: ViewState,
    pub attempts_made: u64,
    /// Error that ended the chain, if it did not load
    pub error: Option<ViewerError>,
}

/// One open of the viewer
pub struct ViewerSession<S: EmbedSurface> {
    id: Uuid,
    selector: RenderSelector<S>,
    candidates: CandidateList,
    signals: SignalReceiver,
    cancel: CancelToken,
}

impl<S: EmbedSurface> ViewerSession<S> {
    /// Create a session and the stream its events arrive on
    pub fn new(
        surface: S,
        signals: SignalReceiver,
        candidates: CandidateList,
        timeouts: StrategyTimeouts,
        cancel: CancelToken,
    ) -> (Self, EventStream) {
        let (selector, events) = RenderSelector::new(surface, timeouts);
        let session = Self {
            id: Uuid::new_v4(),
            selector,
            candidates,
            signals,
            cancel,
        };
        (session, events)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn snapshot(&self) -> AttemptSnapshot {
        self.selector.snapshot()
    }

    /// Run until the view is closed
    pub async fn run(self) -> SessionReport {
        let span = tracing::debug_span!("viewer_session", id = %self.id);
        self.drive().instrument(span).await
    }

    async fn drive(mut self) -> SessionReport {
        if self.cancel.is_cancelled() {
            return self.finish();
        }

        let candidates = std::mem::take(&mut self.candidates);
        tracing::info!("[Session] Starting with {} candidate(s)", candidates.len());
        if let Err(e) = self.selector.start(candidates, Instant::now()) {
            tracing::warn!("[Session] Chain ended at start: {}", e);
        }

        loop {
            let deadline = self.selector.next_deadline();
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    tracing::debug!("[Session] Cancelled");
                    break;
                }

                signal = self.signals.recv() => match signal {
                    Some(SurfaceSignal::Loaded(handle)) => {
                        self.selector.on_loaded(handle);
                    }
                    Some(SurfaceSignal::Failed(handle, reason)) => {
                        self.selector.on_failed(handle, &reason, Instant::now());
                    }
                    None => {
                        tracing::debug!("[Session] Surface went away");
                        break;
                    }
                },

                _ = wait_until(deadline) => {
                    self.selector.on_deadline(Instant::now());
                }
            }
        }

        self.finish()
    }

    fn finish(mut self) -> SessionReport {
        let final_state = self.selector.state();
        let error = match final_state {
            ViewState::Loaded { .. } => None,
            _ => self.selector.last_error().cloned(),
        };
        let attempts_made = self.selector.attempts_made();
        self.selector.cancel();
        tracing::info!(
            "[Session] Closed in {:?} after {} attempt(s)",
            final_state,
            attempts_made
        );
        SessionReport {
            session_id: self.id,
            final_state,
            attempts_made,
            error,
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
