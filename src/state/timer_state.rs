//! Timer bookkeeping record

use serde::{Deserialize, Serialize};

use crate::{events::Position, host::Timestamp};

/// Mutable bookkeeping owned by the idle timer
#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    /// Current mode flag (frozen while paused)
    pub idle: bool,
    /// Set on every reset
    pub epoch_start: Timestamp,
    /// Most recent accepted activity, or the last reset
    pub last_active: Timestamp,
    /// Milliseconds left when paused; `Some` iff paused
    pub remaining: Option<u64>,
    /// Last pointer coordinates seen
    pub last_position: Option<Position>,
}

impl TimerState {
    /// Fresh state at `now`, idle unless the timer starts on mount
    pub fn new(now: Timestamp, start_on_mount: bool) -> Self {
        Self {
            idle: !start_on_mount,
            epoch_start: now,
            last_active: now,
            remaining: None,
            last_position: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn mode(&self) -> Mode {
        if self.is_paused() {
            Mode::Paused
        } else if self.idle {
            Mode::Idle
        } else {
            Mode::Active
        }
    }

    /// Restart the epoch at `now`
    pub fn restart(&mut self, now: Timestamp) {
        self.idle = false;
        self.epoch_start = now;
        self.last_active = now;
        self.remaining = None;
    }

    /// Record an accepted activity event
    pub fn touch(&mut self, now: Timestamp, position: Option<Position>) {
        self.last_active = now;
        self.last_position = position;
    }
}

/// Externally visible mode of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Active,
    Idle,
    Paused,
}

/// Point-in-time view of the timer, as returned by status queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: Mode,
    pub idle: bool,
    pub paused: bool,
    pub timeout_ms: u64,
    pub remaining_ms: u64,
    pub elapsed_ms: u64,
    pub last_active: Timestamp,
}
