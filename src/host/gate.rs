//! In-process listener registry

use std::collections::HashMap;

use tracing::debug;

use super::{EventTarget, ListenerOptions};
use crate::{error::Result, events::EventKind};

/// Records which event kinds are subscribed and drops everything else.
///
/// Used by hosts that receive events from a single inbound stream (the HTTP
/// surface, tests) instead of per-kind platform listeners.
#[derive(Debug, Default)]
pub struct EventGate {
    subscriptions: HashMap<EventKind, ListenerOptions>,
}

impl EventGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an event of this kind should be delivered to the timer
    pub fn accepts(&self, kind: EventKind) -> bool {
        self.subscriptions.contains_key(&kind)
    }

    pub fn options(&self, kind: EventKind) -> Option<ListenerOptions> {
        self.subscriptions.get(&kind).copied()
    }

    pub fn subscribed(&self) -> usize {
        self.subscriptions.len()
    }
}

impl EventTarget for EventGate {
    fn subscribe(&mut self, kind: EventKind, options: ListenerOptions) -> Result<()> {
        debug!("Subscribing to {} (capture={}, passive={})", kind, options.capture, options.passive);
        self.subscriptions.insert(kind, options);
        Ok(())
    }

    fn unsubscribe(&mut self, kind: EventKind, _options: ListenerOptions) -> Result<()> {
        debug!("Unsubscribing from {}", kind);
        self.subscriptions.remove(&kind);
        Ok(())
    }
}
