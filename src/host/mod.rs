//! Host environment seams
//!
//! The idle timer never reads the clock, sleeps, or registers listeners on
//! its own. It talks to the host through the traits in this module, and the
//! submodules provide a deterministic virtual-time host and a tokio host.

pub mod gate;
pub mod runtime;
pub mod slot;
pub mod virtual_time;

use serde::{Deserialize, Serialize};

use crate::{error::Result, events::EventKind};

// Re-export main types
pub use gate::EventGate;
pub use runtime::{MonotonicClock, TokioScheduler};
pub use slot::TimeoutSlot;
pub use virtual_time::{VirtualClock, VirtualScheduler, VirtualTime};

/// Milliseconds on the host's monotonic clock
pub type Timestamp = u64;

/// Opaque token identifying one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// Monotonic clock reader
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// One-shot deferred execution.
///
/// When the delay has passed the host hands the returned handle back to
/// `IdleTimerCore::handle_timeout`. A cancelled handle may still be
/// delivered if it was already in flight; the core ignores it.
pub trait Scheduler {
    fn schedule_once(&mut self, delay_ms: u64) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Flags forwarded to the listener collaborator untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerOptions {
    pub capture: bool,
    pub passive: bool,
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self {
            capture: true,
            passive: true,
        }
    }
}

/// Listener registration capability of the host
pub trait EventTarget {
    fn subscribe(&mut self, kind: EventKind, options: ListenerOptions) -> Result<()>;
    fn unsubscribe(&mut self, kind: EventKind, options: ListenerOptions) -> Result<()>;
}
