//! Scripted embed surface
//!
//! Decides per attach whether the element loads, errors or never answers,
//! and reports the outcome on the session's signal channel right away.
//! Everything it did is recorded in a shared `SurfaceLog`.

use booksansar::shared::EmbedKind;
use booksansar::viewer::surface::{
    signal_channel, AttachError, ElementHandle, EmbedSurface, SignalReceiver, SignalSender,
    SurfaceSignal,
};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// What an attached element does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    Load,
    Fail(&'static str),
    Hang,
    Reject,
}

#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub attached: BTreeSet<ElementHandle>,
    pub attaches: Vec<(EmbedKind, String)>,
    pub detaches: usize,
    pub max_attached: usize,
}

type Script = Box<dyn Fn(EmbedKind, &str) -> Behavior + Send>;

pub struct ScriptedSurface {
    script: Script,
    signals: SignalSender,
    log: Arc<Mutex<SurfaceLog>>,
    container: bool,
    next: u64,
}

impl ScriptedSurface {
    /// Surface plus the receiver a session listens on and the shared log
    pub fn new(
        script: impl Fn(EmbedKind, &str) -> Behavior + Send + 'static,
    ) -> (Self, SignalReceiver, Arc<Mutex<SurfaceLog>>) {
        let (tx, rx) = signal_channel();
        let log = Arc::new(Mutex::new(SurfaceLog::default()));
        let surface = Self {
            script: Box::new(script),
            signals: tx,
            log: Arc::clone(&log),
            container: true,
            next: 0,
        };
        (surface, rx, log)
    }

    pub fn without_container(mut self) -> Self {
        self.container = false;
        self
    }
}

impl EmbedSurface for ScriptedSurface {
    fn container_available(&self) -> bool {
        self.container
    }

    fn attach(&mut self, kind: EmbedKind, url: &str) -> Result<ElementHandle, AttachError> {
        let behavior = (self.script)(kind, url);
        if behavior == Behavior::Reject {
            return Err(AttachError::Rejected("scripted rejection".to_string()));
        }

        self.next += 1;
        let handle = ElementHandle(self.next);
        {
            let mut log = self.log.lock().unwrap();
            log.attached.insert(handle);
            log.attaches.push((kind, url.to_string()));
            log.max_attached = log.max_attached.max(log.attached.len());
        }

        let signal = match behavior {
            Behavior::Load => Some(SurfaceSignal::Loaded(handle)),
            Behavior::Fail(reason) => Some(SurfaceSignal::Failed(handle, reason.to_string())),
            Behavior::Hang | Behavior::Reject => None,
        };
        if let Some(signal) = signal {
            let _ = self.signals.send(signal);
        }
        Ok(handle)
    }

    fn detach(&mut self, handle: ElementHandle) {
        let mut log = self.log.lock().unwrap();
        if log.attached.remove(&handle) {
            log.detaches += 1;
        }
    }

    fn attached_count(&self) -> usize {
        self.log.lock().unwrap().attached.len()
    }
}
