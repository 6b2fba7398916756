//! Cancellation token for viewer sessions.
//!
//! The hosting view keeps the [`CancelHandle`]; every session it starts gets
//! a [`CancelToken`]. Closing the view (or dropping the handle) cancels all
//! of them.

use tokio::sync::watch;

/// Owner side, held by the hosting view
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Session side
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

/// Create a linked handle/token pair
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        // send_replace never fails, even with no receivers left
        self.tx.send_replace(true);
    }

    /// Another token tied to this handle
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancelled, or once the handle is dropped
    pub async fn cancelled(&mut self) {
        // wait_for errors only when the sender is gone, which counts as cancelled
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}
