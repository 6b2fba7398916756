//! # Embed Surface
//!
//! The seam between the render selector and whatever actually displays the
//! PDF. A surface owns the hosting container and the embed/iframe elements
//! inside it; the selector only ever sees opaque [`ElementHandle`]s.
//!
//! Surfaces report element load/error callbacks back to the session driver
//! as [`SurfaceSignal`]s over an unbounded channel.

use crate::shared::EmbedKind;
use std::fmt;
use thiserror::Error;
use tokio::sync::mpsc;

/// Opaque handle to an attached element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u64);

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Why an attach was refused
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttachError {
    /// The hosting container is gone
    #[error("container missing")]
    ContainerMissing,
    /// The surface could not create the element
    #[error("attach rejected: {0}")]
    Rejected(String),
}

/// Callback from an attached element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceSignal {
    Loaded(ElementHandle),
    Failed(ElementHandle, String),
}

pub type SignalSender = mpsc::UnboundedSender<SurfaceSignal>;
pub type SignalReceiver = mpsc::UnboundedReceiver<SurfaceSignal>;

/// Create the channel a surface reports element callbacks on
pub fn signal_channel() -> (SignalSender, SignalReceiver) {
    mpsc::unbounded_channel()
}

/// Hosting container for embed elements
///
/// Implementations must treat `detach` of an unknown or already detached
/// handle as a no-op.
pub trait EmbedSurface {
    /// Whether the hosting container exists
    fn container_available(&self) -> bool;

    /// Create an element of `kind` pointed at `url`
    fn attach(&mut self, kind: EmbedKind, url: &str) -> Result<ElementHandle, AttachError>;

    /// Remove an element
    fn detach(&mut self, handle: ElementHandle);

    /// Number of elements currently attached
    fn attached_count(&self) -> usize;
}

impl<S: EmbedSurface + ?Sized> EmbedSurface for Box<S> {
    fn container_available(&self) -> bool {
        (**self).container_available()
    }

    fn attach(&mut self, kind: EmbedKind, url: &str) -> Result<ElementHandle, AttachError> {
        (**self).attach(kind, url)
    }

    fn detach(&mut self, handle: ElementHandle) {
        (**self).detach(handle)
    }

    fn attached_count(&self) -> usize {
        (**self).attached_count()
    }
}
