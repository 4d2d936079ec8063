//! idlewatch - Idle/active detection with a controllable timer
//!
//! This is the main entry point for the idlewatch daemon.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use idlewatch::{
    api::{create_router, ServerState},
    config::Config,
    state::Callbacks,
    tasks::spawn_idle_timer,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("idlewatch={},tower_http=info", config.log_level()))
        .init();

    let timer_config = config.timer_config();
    info!("Starting idlewatch v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, timeout={}ms, events={}",
        config.host,
        config.port,
        timer_config.timeout_ms,
        timer_config.events.iter().map(|kind| kind.as_str()).collect::<Vec<_>>().join(",")
    );

    let callbacks = Callbacks::new()
        .on_idle(|_| info!("User went idle"))
        .on_active(|event| {
            if let Some(event) = event {
                info!("User active again ({})", event.kind);
            }
        });
    let (timer, timer_task) = spawn_idle_timer(timer_config, callbacks);

    let app = create_router(Arc::new(ServerState::new(timer.clone())));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /event  - Deliver an activity event");
    info!("  POST /reset  - Restart the idle timer");
    info!("  POST /pause  - Pause the idle timer");
    info!("  POST /resume - Resume the idle timer");
    info!("  GET  /status - Current timer state");
    info!("  GET  /health - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    timer.shutdown().await?;
    timer_task.await?;

    info!("Server shutdown complete");
    Ok(())
}
