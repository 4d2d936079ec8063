//! Activation and teardown against the listener collaborator

use tracing::{info, warn};

use super::IdleTimerCore;
use crate::{
    error::Result,
    host::{Clock, EventTarget, Scheduler},
};

impl<C: Clock, S: Scheduler> IdleTimerCore<C, S> {
    /// Subscribe to the configured events and start the timer if configured to.
    ///
    /// If a subscription fails, the kinds already subscribed are released
    /// before the error is returned.
    pub fn activate<T: EventTarget + ?Sized>(&mut self, target: &mut T) -> Result<()> {
        let mut subscribed = Vec::with_capacity(self.config.events.len());
        for kind in self.config.events.iter() {
            if let Err(e) = target.subscribe(kind, self.config.listener) {
                for done in subscribed {
                    if let Err(undo) = target.unsubscribe(done, self.config.listener) {
                        warn!("Failed to release {} listener: {}", done, undo);
                    }
                }
                return Err(e);
            }
            subscribed.push(kind);
        }

        info!(
            "Idle timer activated: timeout={}ms, events={}, start_on_mount={}",
            self.config.timeout_ms,
            self.config.events.len(),
            self.config.start_on_mount
        );

        if self.config.start_on_mount {
            self.reset();
        }
        Ok(())
    }

    /// Cancel the pending callback, then release every subscription.
    ///
    /// All kinds are unsubscribed even if one fails; the first failure is
    /// returned.
    pub fn deactivate<T: EventTarget + ?Sized>(&mut self, target: &mut T) -> Result<()> {
        self.slot.clear(&mut self.scheduler);

        let mut first_error = None;
        for kind in self.config.events.iter() {
            if let Err(e) = target.unsubscribe(kind, self.config.listener) {
                warn!("Failed to release {} listener: {}", kind, e);
                first_error.get_or_insert(e);
            }
        }

        info!("Idle timer deactivated");
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
