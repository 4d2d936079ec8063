//! Deterministic host driven by hand
//!
//! Time only moves when `advance_to` is called, and due callbacks are fired
//! in deadline order. Embedders that own their own event loop can use this
//! host directly; the test-suite uses it for every timing scenario.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use super::{Clock, Scheduler, TimerHandle, Timestamp};
use crate::timer::IdleTimerCore;

#[derive(Debug, Default)]
struct Inner {
    now: Timestamp,
    next_handle: u64,
    pending: BTreeMap<TimerHandle, Timestamp>,
}

/// Shared virtual clock and timer queue
#[derive(Debug, Clone, Default)]
pub struct VirtualTime {
    inner: Arc<Mutex<Inner>>,
}

impl VirtualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> VirtualClock {
        VirtualClock(self.clone())
    }

    pub fn scheduler(&self) -> VirtualScheduler {
        VirtualScheduler(self.clone())
    }

    pub fn now(&self) -> Timestamp {
        self.lock().now
    }

    /// Number of callbacks scheduled and not yet fired or cancelled
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Move time forward to `to`, firing every callback that falls due on the way
    pub fn advance_to<C: Clock, S: Scheduler>(&self, core: &mut IdleTimerCore<C, S>, to: Timestamp) {
        while let Some(handle) = self.pop_due(to) {
            core.handle_timeout(handle);
        }
        let mut inner = self.lock();
        inner.now = inner.now.max(to);
    }

    fn pop_due(&self, limit: Timestamp) -> Option<TimerHandle> {
        let mut inner = self.lock();
        let (handle, due_at) = inner
            .pending
            .iter()
            .filter(|(_, &due_at)| due_at <= limit)
            .min_by_key(|(&handle, &due_at)| (due_at, handle))
            .map(|(&handle, &due_at)| (handle, due_at))?;
        inner.pending.remove(&handle);
        inner.now = inner.now.max(due_at);
        Some(handle)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Clock half of a `VirtualTime`
#[derive(Debug, Clone)]
pub struct VirtualClock(VirtualTime);

impl Clock for VirtualClock {
    fn now(&self) -> Timestamp {
        self.0.now()
    }
}

/// Scheduler half of a `VirtualTime`
#[derive(Debug, Clone)]
pub struct VirtualScheduler(VirtualTime);

impl Scheduler for VirtualScheduler {
    fn schedule_once(&mut self, delay_ms: u64) -> TimerHandle {
        let mut inner = self.0.lock();
        inner.next_handle += 1;
        let handle = TimerHandle(inner.next_handle);
        let due_at = inner.now.saturating_add(delay_ms);
        inner.pending.insert(handle, due_at);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.0.lock().pending.remove(&handle);
    }
}
