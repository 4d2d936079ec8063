//! Configuration and CLI argument handling

use clap::Parser;

use crate::{
    events::EventSet,
    host::ListenerOptions,
    state::{TimerConfig, DEFAULT_TIMEOUT_MS},
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "idlewatch")]
#[command(about = "Idle/active detection timer with an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Inactivity timeout in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Comma separated event kinds that count as activity (default: all)
    #[arg(short, long)]
    pub events: Option<EventSet>,

    /// Start idle and wait for the first event instead of starting the timer
    #[arg(long)]
    pub no_start_on_mount: bool,

    /// Register listeners without the capture flag
    #[arg(long)]
    pub no_capture: bool,

    /// Register listeners without the passive flag
    #[arg(long)]
    pub no_passive: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Timer settings selected on the command line
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            timeout_ms: self.timeout,
            events: self.events.clone().unwrap_or_default(),
            start_on_mount: !self.no_start_on_mount,
            listener: ListenerOptions {
                capture: !self.no_capture,
                passive: !self.no_passive,
            },
        }
    }
}
