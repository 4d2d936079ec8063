//! Timer configuration and notification callbacks

use std::fmt;

use crate::{events::{ActivityEvent, EventSet}, host::ListenerOptions};

/// Twenty minutes
pub const DEFAULT_TIMEOUT_MS: u64 = 1_200_000;

/// Immutable configuration supplied at construction
#[derive(Debug, Clone, PartialEq)]
pub struct TimerConfig {
    /// Inactivity period after which the user is considered idle
    pub timeout_ms: u64,
    /// Event kinds that count as activity
    pub events: EventSet,
    /// Start the timer as soon as it is activated
    pub start_on_mount: bool,
    /// Passed through to the listener collaborator
    pub listener: ListenerOptions,
}

impl TimerConfig {
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            ..Self::default()
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            events: EventSet::default(),
            start_on_mount: true,
            listener: ListenerOptions::default(),
        }
    }
}

/// Boxed notification hook; `None` means the deferred callback caused it
pub(crate) type Hook = Box<dyn FnMut(Option<&ActivityEvent>) + Send>;

/// `on_idle`, `on_active` and `on_event` notifications, no-ops by default
pub struct Callbacks {
    pub(crate) on_idle: Hook,
    pub(crate) on_active: Hook,
    pub(crate) on_event: Hook,
}

impl Callbacks {
    pub fn new() -> Self {
        Self {
            on_idle: Box::new(|_: Option<&ActivityEvent>| {}),
            on_active: Box::new(|_: Option<&ActivityEvent>| {}),
            on_event: Box::new(|_: Option<&ActivityEvent>| {}),
        }
    }

    pub fn on_idle<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Option<&ActivityEvent>) + Send + 'static,
    {
        self.on_idle = Box::new(hook);
        self
    }

    pub fn on_active<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Option<&ActivityEvent>) + Send + 'static,
    {
        self.on_active = Box::new(hook);
        self
    }

    pub fn on_event<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Option<&ActivityEvent>) + Send + 'static,
    {
        self.on_event = Box::new(hook);
        self
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}
