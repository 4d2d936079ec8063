//! Tokio-backed clock and scheduler

use std::{collections::HashMap, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tracing::{debug, warn};

use super::{Clock, Scheduler, TimerHandle, Timestamp};

/// Milliseconds since the clock was created.
///
/// Built on `tokio::time::Instant` so paused test time drives it too.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }
}

/// Schedules callbacks as sleeping tasks.
///
/// When a task wakes it sends its handle on the fire channel; the task that
/// owns the idle timer receives it and calls `handle_timeout`.
#[derive(Debug)]
pub struct TokioScheduler {
    fire_tx: mpsc::UnboundedSender<TimerHandle>,
    next_handle: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(fire_tx: mpsc::UnboundedSender<TimerHandle>) -> Self {
        Self {
            fire_tx,
            next_handle: 0,
            tasks: HashMap::new(),
        }
    }

    /// Number of sleeping tasks not yet finished or cancelled
    pub fn in_flight(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(&mut self, delay_ms: u64) -> TimerHandle {
        // Drop bookkeeping for tasks that already fired
        self.tasks.retain(|_, task| !task.is_finished());

        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        let fire_tx = self.fire_tx.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            if fire_tx.send(handle).is_err() {
                warn!("Idle timer owner is gone, dropping callback {:?}", handle);
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!("Aborted sleeping task for {:?}", handle);
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
