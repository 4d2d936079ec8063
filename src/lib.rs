//! idlewatch - Idle/active detection with a controllable timer
//!
//! This library tracks whether a user is active or idle from a stream of
//! input events. The state machine lives in [`timer`]; it reaches the outside
//! world only through the clock, scheduler and listener seams in [`host`].
//! [`tasks`] runs it on tokio and [`api`] exposes that task over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{Error, Result};
pub use events::{ActivityEvent, EventKind, EventSet, Position};
pub use state::{Callbacks, Mode, TimerConfig, TimerSnapshot};
pub use tasks::{spawn_idle_timer, IdleTimerHandle, Transition};
pub use timer::IdleTimerCore;
pub use utils::signals::shutdown_signal;
