//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{events::EventKind, state::TimerSnapshot};

/// Response for the control endpoints (reset, pause, resume)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlResponse {
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ControlResponse {
    pub fn new(action: &str, timer: TimerSnapshot) -> Self {
        Self {
            action: action.to_string(),
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Response for POST /event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub kind: EventKind,
    /// Whether the event counted as activity
    pub counted: bool,
    pub timestamp: DateTime<Utc>,
}

/// Status response with the full timer snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub uptime: String,
    pub timestamp: DateTime<Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
