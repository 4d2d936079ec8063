//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use tracing::{debug, error, info};

use super::{
    responses::{ControlResponse, EventResponse, HealthResponse, StatusResponse},
    ServerState,
};
use crate::{error::Error, events::ActivityEvent};

fn unavailable(action: &str, e: Error) -> StatusCode {
    error!("Failed to {}: {}", action, e);
    StatusCode::SERVICE_UNAVAILABLE
}

/// Handle POST /event - Feed one activity event to the timer
pub async fn event_handler(
    State(state): State<Arc<ServerState>>,
    Json(event): Json<ActivityEvent>,
) -> Result<Json<EventResponse>, StatusCode> {
    let kind = event.kind;
    let counted = state
        .timer
        .handle_event(event)
        .await
        .map_err(|e| unavailable("deliver event", e))?;

    debug!("Event {} counted={}", kind, counted);
    Ok(Json(EventResponse {
        kind,
        counted,
        timestamp: Utc::now(),
    }))
}

/// Handle POST /reset - Restart the timer
pub async fn reset_handler(State(state): State<Arc<ServerState>>) -> Result<Json<ControlResponse>, StatusCode> {
    let timer = state.timer.reset().await.map_err(|e| unavailable("reset timer", e))?;
    info!("Reset endpoint called");
    Ok(Json(ControlResponse::new("reset", timer)))
}

/// Handle POST /pause - Freeze the timer
pub async fn pause_handler(State(state): State<Arc<ServerState>>) -> Result<Json<ControlResponse>, StatusCode> {
    let timer = state.timer.pause().await.map_err(|e| unavailable("pause timer", e))?;
    info!("Pause endpoint called - {}ms remaining", timer.remaining_ms);
    Ok(Json(ControlResponse::new("pause", timer)))
}

/// Handle POST /resume - Continue a paused timer
pub async fn resume_handler(State(state): State<Arc<ServerState>>) -> Result<Json<ControlResponse>, StatusCode> {
    let timer = state.timer.resume().await.map_err(|e| unavailable("resume timer", e))?;
    info!("Resume endpoint called");
    Ok(Json(ControlResponse::new("resume", timer)))
}

/// Handle GET /status - Return the current timer snapshot
pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = state.timer.snapshot().await.map_err(|e| unavailable("read timer", e))?;
    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        timestamp: Utc::now(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
