//! State management module
//!
//! This module contains the timer bookkeeping record and the immutable
//! configuration the timer is built from.

pub mod timer_config;
pub mod timer_state;

// Re-export main types
pub use timer_config::{Callbacks, TimerConfig, DEFAULT_TIMEOUT_MS};
pub use timer_state::{Mode, TimerSnapshot, TimerState};
