//! Background tasks module
//!
//! This module contains the task that owns a running idle timer.

pub mod idle_timer;

// Re-export main types
pub use idle_timer::{spawn_idle_timer, IdleTimerHandle, Transition};
