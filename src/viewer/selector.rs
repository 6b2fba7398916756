//! # Render Strategy Selector
//!
//! State machine that walks a [`CandidateList`] trying, for each candidate,
//! a native object embed and then an iframe:
//!
//! ```text
//! Idle -> TryingEmbed(c) -> TryingIframe(c) -> TryingEmbed(c + 1) -> ... -> Exhausted
//!              \                  \
//!               +-> Loaded         +-> Loaded
//! ```
//!
//! The selector is synchronous and clock-agnostic: callers pass `now` in and
//! poll [`RenderSelector::next_deadline`]. [`crate::viewer::session`] is the
//! async driver that feeds it element callbacks and timer expiries.
//!
//! At most one element is attached at any time. Every transition detaches
//! the previous element before attaching the next, and callbacks carrying a
//! handle other than the current one are ignored.

use crate::debug::validate_invariant;
use crate::shared::config::ViewerConfig;
use crate::shared::{CandidateList, EmbedKind, ViewState, ViewerError, ViewerEvent};
use crate::viewer::surface::{AttachError, ElementHandle, EmbedSurface};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Receiving end of a selector's events
pub type EventStream = mpsc::UnboundedReceiver<ViewerEvent>;

/// How long each strategy gets before escalating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyTimeouts {
    pub embed: Duration,
    pub iframe: Duration,
}

impl Default for StrategyTimeouts {
    fn default() -> Self {
        Self {
            embed: Duration::from_secs(3),
            iframe: Duration::from_secs(5),
        }
    }
}

impl StrategyTimeouts {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            embed: config.embed_timeout(),
            iframe: config.iframe_timeout(),
        }
    }

    fn for_kind(&self, kind: EmbedKind) -> Duration {
        match kind {
            EmbedKind::Object => self.embed,
            EmbedKind::Iframe => self.iframe,
        }
    }
}

/// Outcome of one candidate/strategy attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    Pending,
    Loaded,
    TimedOut,
    Errored,
}

/// The one attempt currently in flight
#[derive(Debug, Clone)]
pub struct RenderAttempt {
    pub id: u64,
    pub candidate: usize,
    pub url: String,
    pub strategy: EmbedKind,
    pub status: AttemptStatus,
    pub deadline: Instant,
    handle: Option<ElementHandle>,
}

impl RenderAttempt {
    pub fn handle(&self) -> Option<ElementHandle> {
        self.handle
    }
}

/// Serializable view of the selector, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptSnapshot {
    pub state: ViewState,
    pub candidate: Option<usize>,
    pub url: Option<String>,
    pub strategy: Option<EmbedKind>,
    pub status: Option<AttemptStatus>,
    pub attempts_made: u64,
}

impl Default for AttemptSnapshot {
    fn default() -> Self {
        Self {
            state: ViewState::Idle,
            candidate: None,
            url: None,
            strategy: None,
            status: None,
            attempts_made: 0,
        }
    }
}

/// Per-view render state machine
pub struct RenderSelector<S: EmbedSurface> {
    surface: S,
    timeouts: StrategyTimeouts,
    candidates: CandidateList,
    state: ViewState,
    attempt: Option<RenderAttempt>,
    attempts_made: u64,
    last_error: Option<ViewerError>,
    events: Option<mpsc::UnboundedSender<ViewerEvent>>,
}

impl<S: EmbedSurface> RenderSelector<S> {
    pub fn new(surface: S, timeouts: StrategyTimeouts) -> (Self, EventStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        let selector = Self {
            surface,
            timeouts,
            candidates: CandidateList::new(),
            state: ViewState::Idle,
            attempt: None,
            attempts_made: 0,
            last_error: None,
            events: Some(tx),
        };
        (selector, rx)
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn attempt(&self) -> Option<&RenderAttempt> {
        self.attempt.as_ref()
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Surfaced error that ended the chain, if any
    pub fn last_error(&self) -> Option<&ViewerError> {
        self.last_error.as_ref()
    }

    /// Number of embed/iframe attachments made since the last start
    pub fn attempts_made(&self) -> u64 {
        self.attempts_made
    }

    /// Begin (or restart) the chain over `candidates`.
    ///
    /// Returns the surfaced error if the chain ended before any element
    /// could be attached.
    pub fn start(&mut self, candidates: CandidateList, now: Instant) -> Result<(), ViewerError> {
        if self.state == ViewState::Closed {
            tracing::warn!("[Selector] start() after teardown ignored");
            return Ok(());
        }

        self.teardown_attempt();
        self.candidates = candidates;
        self.attempts_made = 0;
        self.last_error = None;
        self.set_state(ViewState::Idle);

        if !self.surface.container_available() {
            self.fail(ViewerError::ContainerUnavailable);
        } else if self.candidates.is_empty() {
            self.exhaust();
        } else {
            self.enter(0, EmbedKind::Object, now);
        }

        match (&self.state, &self.last_error) {
            (ViewState::Exhausted, Some(error)) => Err(error.clone()),
            _ => Ok(()),
        }
    }

    /// Tear down: detach the current element and stop emitting events.
    ///
    /// Idempotent. Every later callback is ignored.
    pub fn cancel(&mut self) {
        if self.state == ViewState::Closed {
            return;
        }
        self.teardown_attempt();
        self.state = ViewState::Closed;
        self.events = None;
        tracing::debug!("[Selector] Closed");
    }

    /// Earliest instant at which [`Self::on_deadline`] has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_attempt().map(|attempt| attempt.deadline)
    }

    /// Element finished loading. Returns whether the callback was current.
    pub fn on_loaded(&mut self, handle: ElementHandle) -> bool {
        if !self.is_current(handle) {
            tracing::debug!("[Selector] Ignoring stale load from {}", handle);
            return false;
        }
        let Some(attempt) = self.attempt.as_mut() else {
            return false;
        };
        attempt.status = AttemptStatus::Loaded;
        let (candidate, strategy, url) = (attempt.candidate, attempt.strategy, attempt.url.clone());

        tracing::info!("[Selector] Loaded {} via {}", url, strategy);
        self.set_state(ViewState::Loaded { candidate, strategy });
        self.emit(ViewerEvent::loaded(url, strategy));
        true
    }

    /// Element reported an error. Returns whether the callback was current.
    pub fn on_failed(&mut self, handle: ElementHandle, reason: &str, now: Instant) -> bool {
        if !self.is_current(handle) {
            tracing::debug!("[Selector] Ignoring stale error from {}", handle);
            return false;
        }
        self.fail_current(AttemptStatus::Errored, reason.to_string(), now);
        true
    }

    /// Timer tick. Escalates the current attempt if its deadline passed.
    pub fn on_deadline(&mut self, now: Instant) -> bool {
        let Some(attempt) = self.pending_attempt() else {
            return false;
        };
        if now < attempt.deadline {
            return false;
        }
        let timeout = self.timeouts.for_kind(attempt.strategy);
        self.fail_current(
            AttemptStatus::TimedOut,
            format!("timed out after {}ms", timeout.as_millis()),
            now,
        );
        true
    }

    /// Diagnostic snapshot of the current attempt
    pub fn snapshot(&self) -> AttemptSnapshot {
        AttemptSnapshot {
            state: self.state,
            candidate: self.attempt.as_ref().map(|a| a.candidate),
            url: self.attempt.as_ref().map(|a| a.url.clone()),
            strategy: self.attempt.as_ref().map(|a| a.strategy),
            status: self.attempt.as_ref().map(|a| a.status),
            attempts_made: self.attempts_made,
        }
    }

    fn pending_attempt(&self) -> Option<&RenderAttempt> {
        self.attempt
            .as_ref()
            .filter(|attempt| attempt.status == AttemptStatus::Pending)
    }

    fn is_current(&self, handle: ElementHandle) -> bool {
        !self.state.is_settled()
            && self
                .pending_attempt()
                .is_some_and(|attempt| attempt.handle == Some(handle))
    }

    fn fail_current(&mut self, status: AttemptStatus, reason: String, now: Instant) {
        let Some(attempt) = self.attempt.as_mut() else {
            return;
        };
        attempt.status = status;
        let (candidate, strategy) = (attempt.candidate, attempt.strategy);
        let error = match strategy {
            EmbedKind::Object => ViewerError::embed_failed(&attempt.url, reason),
            EmbedKind::Iframe => ViewerError::iframe_failed(&attempt.url, reason),
        };
        tracing::warn!("[Selector] {}", error);

        let (next_candidate, next_strategy) = next_step(candidate, strategy);
        self.enter(next_candidate, next_strategy, now);
    }

    /// Attach `strategy` for `candidate`, skipping ahead past refused attaches
    fn enter(&mut self, mut candidate: usize, mut strategy: EmbedKind, now: Instant) {
        loop {
            self.teardown_attempt();

            let Some(url) = self.candidates.get(candidate).map(|c| c.url.clone()) else {
                self.exhaust();
                return;
            };

            self.set_state(match strategy {
                EmbedKind::Object => ViewState::TryingEmbed { candidate },
                EmbedKind::Iframe => ViewState::TryingIframe { candidate },
            });

            match self.surface.attach(strategy, &url) {
                Ok(handle) => {
                    self.attempts_made += 1;
                    tracing::debug!(
                        "[Selector] Attempt {}: {} {} as {}",
                        self.attempts_made,
                        strategy,
                        url,
                        handle
                    );
                    self.attempt = Some(RenderAttempt {
                        id: self.attempts_made,
                        candidate,
                        url,
                        strategy,
                        status: AttemptStatus::Pending,
                        deadline: now + self.timeouts.for_kind(strategy),
                        handle: Some(handle),
                    });
                    self.check_single_element();
                    return;
                }
                Err(AttachError::ContainerMissing) => {
                    self.fail(ViewerError::ContainerUnavailable);
                    return;
                }
                Err(AttachError::Rejected(reason)) => {
                    tracing::warn!("[Selector] {} for {} refused: {}", strategy, url, reason);
                    (candidate, strategy) = next_step(candidate, strategy);
                }
            }
        }
    }

    fn exhaust(&mut self) {
        self.fail(ViewerError::CandidatesExhausted {
            tried: self.candidates.len(),
        });
    }

    fn fail(&mut self, error: ViewerError) {
        self.teardown_attempt();
        tracing::error!("[Selector] {}", error);
        self.set_state(ViewState::Exhausted);
        self.emit(ViewerEvent::failed(error.to_string()));
        self.last_error = Some(error);
    }

    fn teardown_attempt(&mut self) {
        if let Some(mut attempt) = self.attempt.take() {
            if let Some(handle) = attempt.handle.take() {
                self.surface.detach(handle);
            }
        }
    }

    fn set_state(&mut self, state: ViewState) {
        if self.state == state {
            return;
        }
        tracing::debug!("[Selector] {:?} -> {:?}", self.state, state);
        self.state = state;
        self.emit(ViewerEvent::state_changed(state));
    }

    fn emit(&self, event: ViewerEvent) {
        if let Some(tx) = &self.events {
            if tx.send(event).is_err() {
                tracing::debug!("[Selector] Event receiver dropped");
            }
        }
    }

    fn check_single_element(&self) {
        validate_invariant(
            self.surface.attached_count() <= 1,
            "render selector has more than one element attached",
        );
    }
}

fn next_step(candidate: usize, strategy: EmbedKind) -> (usize, EmbedKind) {
    match strategy {
        EmbedKind::Object => (candidate, EmbedKind::Iframe),
        EmbedKind::Iframe => (candidate + 1, EmbedKind::Object),
    }
}
