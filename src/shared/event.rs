/**
 * Viewer Event System
 *
 * This module defines the events a viewer session reports to its host page.
 * The host only needs two of them to drive its UI (`Loaded` and `Failed`);
 * `StateChanged` is there for hosts that render declaratively from the
 * selector state.
 */
use serde::{Deserialize, Serialize};
use std::fmt;

/// Browser mechanism used to render a PDF inline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EmbedKind {
    /// Native `<object>`/`<embed>` element
    Object,
    /// `<iframe>` element
    Iframe,
}

impl fmt::Display for EmbedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedKind::Object => f.write_str("object"),
            EmbedKind::Iframe => f.write_str("iframe"),
        }
    }
}

/// Render selector state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    TryingEmbed { candidate: usize },
    TryingIframe { candidate: usize },
    Loaded { candidate: usize, strategy: EmbedKind },
    Exhausted,
    /// The hosting view was torn down
    Closed,
}

impl ViewState {
    /// `Loaded`, `Exhausted` and `Closed` accept no further callbacks
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            ViewState::Loaded { .. } | ViewState::Exhausted | ViewState::Closed
        )
    }
}

/// Notification delivered to the host page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewerEvent {
    /// The selector moved to a new state
    StateChanged { state: ViewState },
    /// A candidate rendered successfully
    Loaded {
        url: String,
        strategy: EmbedKind,
        timestamp: String,
    },
    /// Terminal, user-visible failure
    Failed { message: String, timestamp: String },
}

impl ViewerEvent {
    pub fn state_changed(state: ViewState) -> Self {
        Self::StateChanged { state }
    }

    pub fn loaded(url: impl Into<String>, strategy: EmbedKind) -> Self {
        Self::Loaded {
            url: url.into(),
            strategy,
            timestamp: get_timestamp(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            timestamp: get_timestamp(),
        }
    }

    /// `Loaded` or `Failed`
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ViewerEvent::StateChanged { .. })
    }
}

/// Get the current timestamp as an RFC3339 string
fn get_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
