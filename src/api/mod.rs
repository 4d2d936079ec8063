//! HTTP API module
//!
//! Exposes a running idle timer over HTTP: any process can feed activity
//! events and drive or query the timer.

pub mod handlers;
pub mod responses;

use std::{sync::Arc, time::Instant};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::tasks::IdleTimerHandle;
use handlers::*;

/// Shared state handed to every handler
#[derive(Debug)]
pub struct ServerState {
    pub timer: IdleTimerHandle,
    pub start_time: Instant,
}

impl ServerState {
    pub fn new(timer: IdleTimerHandle) -> Self {
        Self {
            timer,
            start_time: Instant::now(),
        }
    }

    /// Server uptime as a short human readable string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/event", post(event_handler))
        .route("/reset", post(reset_handler))
        .route("/pause", post(pause_handler))
        .route("/resume", post(resume_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
