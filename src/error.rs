//! Error types for the host boundary
//!
//! The idle state machine itself cannot fail; errors only arise where the
//! timer meets its host (listener registration, event names, the actor task).

use thiserror::Error;

use crate::events::EventKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),

    #[error("failed to subscribe to {kind}: {reason}")]
    Subscribe { kind: EventKind, reason: String },

    #[error("failed to unsubscribe from {kind}: {reason}")]
    Unsubscribe { kind: EventKind, reason: String },

    #[error("idle timer task has stopped")]
    Stopped,
}

pub type Result<T> = std::result::Result<T, Error>;
