//! Single pending-callback slot

use tracing::debug;

use super::{Scheduler, TimerHandle};

/// Owns at most one scheduled callback.
///
/// Arming always cancels whatever was pending, so callers cannot leak a
/// second timer by forgetting to cancel first.
#[derive(Debug, Default)]
pub struct TimeoutSlot {
    pending: Option<TimerHandle>,
}

impl TimeoutSlot {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Cancel any pending callback and schedule a new one `delay_ms` from now
    pub fn arm<S: Scheduler>(&mut self, scheduler: &mut S, delay_ms: u64) -> TimerHandle {
        self.clear(scheduler);
        let handle = scheduler.schedule_once(delay_ms);
        self.pending = Some(handle);
        debug!("Armed idle callback {:?} for {}ms", handle, delay_ms);
        handle
    }

    /// Cancel the pending callback, if any
    pub fn clear<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
            debug!("Cancelled idle callback {:?}", handle);
        }
    }

    /// Consume the slot if `handle` is the one currently armed.
    ///
    /// Returns false for stale or cancelled handles.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
