//! Viewer Error Types
//!
//! This module defines the error taxonomy of the PDF delivery chain.
//!
//! # Error Categories
//!
//! - `ContainerUnavailable` - the hosting element is missing; fatal for the attempt
//! - `EmbedFailed` - the native embed failed; the selector tries an iframe next
//! - `IframeFailed` - the iframe failed; the selector moves to the next candidate
//! - `CandidatesExhausted` - every candidate failed both strategies; terminal
//! - `ReachabilityCheckFailed` - a diagnostic probe failed; informational only
//! - `NoCandidates`, `DownloadFailed`, `TabOpenFailed` - download fallback path
//!
//! Only `ContainerUnavailable` and `CandidatesExhausted` reach the host as
//! user-visible failures. Everything else drives the state machine or ends
//! up in a diagnostic report.
//!
//! # Usage
//!
//! ```rust
//! use booksansar::shared::error::ViewerError;
//!
//! let error = ViewerError::embed_failed("https://site.test/a.pdf", "timed out");
//! assert!(!error.is_surfaced());
//! ```
use thiserror::Error;

/// Errors produced by the PDF delivery chain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// The hosting container element is not available
    #[error("PDF container is not available")]
    ContainerUnavailable,

    /// Native embed failed for a candidate
    #[error("Embed failed for {url}: {reason}")]
    EmbedFailed {
        /// Candidate URL
        url: String,
        /// Human-readable reason
        reason: String,
    },

    /// Iframe failed for a candidate
    #[error("Iframe failed for {url}: {reason}")]
    IframeFailed {
        /// Candidate URL
        url: String,
        /// Human-readable reason
        reason: String,
    },

    /// Every candidate failed every strategy
    #[error("Unable to display the PDF after trying {tried} location(s)")]
    CandidatesExhausted {
        /// Number of candidates attempted
        tried: usize,
    },

    /// Reachability probe failed
    #[error("Unreachable {url}: {reason}")]
    ReachabilityCheckFailed {
        /// Probed URL
        url: String,
        /// Human-readable reason
        reason: String,
    },

    /// Nothing to download
    #[error("No PDF location available")]
    NoCandidates,

    /// Direct download failed
    #[error("Download of {url} failed: {reason}")]
    DownloadFailed {
        url: String,
        reason: String,
    },

    /// Opening the resource in a new tab failed
    #[error("Could not open {url}: {reason}")]
    TabOpenFailed {
        url: String,
        reason: String,
    },
}

impl ViewerError {
    pub fn embed_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EmbedFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn iframe_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::IframeFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn unreachable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ReachabilityCheckFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn download_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DownloadFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn tab_open_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TabOpenFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether the selector reports this error to the host
    pub fn is_surfaced(&self) -> bool {
        matches!(
            self,
            Self::ContainerUnavailable | Self::CandidatesExhausted { .. }
        )
    }
}
