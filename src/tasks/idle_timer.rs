//! Idle timer background task
//!
//! The timer core is single-threaded, so it lives inside one task that owns
//! it outright. Callers talk to it through `IdleTimerHandle`; timer fires
//! arrive on a second channel fed by the `TokioScheduler`. Both are handled
//! one message at a time, so an event is fully processed before the next
//! event or fire is looked at.

use tokio::{
    sync::{broadcast, mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, error, info};

use crate::{
    error::{Error, Result},
    events::ActivityEvent,
    host::{EventGate, MonotonicClock, TimerHandle, Timestamp, TokioScheduler},
    state::{Callbacks, TimerConfig, TimerSnapshot},
    timer::IdleTimerCore,
};

/// Idle/active flip broadcast to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Idle,
    Active,
}

#[derive(Debug)]
enum Command {
    Event(ActivityEvent, oneshot::Sender<bool>),
    Reset(oneshot::Sender<TimerSnapshot>),
    Pause(oneshot::Sender<TimerSnapshot>),
    Resume(oneshot::Sender<TimerSnapshot>),
    Snapshot(oneshot::Sender<TimerSnapshot>),
    Shutdown(oneshot::Sender<()>),
}

/// Cloneable client for a running idle timer task
#[derive(Debug, Clone)]
pub struct IdleTimerHandle {
    commands: mpsc::Sender<Command>,
    transitions: broadcast::Sender<Transition>,
}

impl IdleTimerHandle {
    /// Deliver a raw activity event; returns whether it counted as activity
    pub async fn handle_event(&self, event: ActivityEvent) -> Result<bool> {
        self.request(|reply| Command::Event(event, reply)).await
    }

    pub async fn reset(&self) -> Result<TimerSnapshot> {
        self.request(Command::Reset).await
    }

    pub async fn pause(&self) -> Result<TimerSnapshot> {
        self.request(Command::Pause).await
    }

    pub async fn resume(&self) -> Result<TimerSnapshot> {
        self.request(Command::Resume).await
    }

    pub async fn snapshot(&self) -> Result<TimerSnapshot> {
        self.request(Command::Snapshot).await
    }

    pub async fn remaining_time(&self) -> Result<u64> {
        Ok(self.snapshot().await?.remaining_ms)
    }

    pub async fn elapsed_time(&self) -> Result<u64> {
        Ok(self.snapshot().await?.elapsed_ms)
    }

    pub async fn last_active_time(&self) -> Result<Timestamp> {
        Ok(self.snapshot().await?.last_active)
    }

    pub async fn is_idle(&self) -> Result<bool> {
        Ok(self.snapshot().await?.idle)
    }

    /// Subscribe to idle/active transitions
    pub fn transitions(&self) -> broadcast::Receiver<Transition> {
        self.transitions.subscribe()
    }

    /// Deactivate the timer and stop the task
    pub async fn shutdown(&self) -> Result<()> {
        self.request(Command::Shutdown).await
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(make(reply_tx))
            .await
            .map_err(|_| Error::Stopped)?;
        reply_rx.await.map_err(|_| Error::Stopped)
    }
}

/// Start an idle timer task on the current runtime.
///
/// The user callbacks run on the task itself, after the transition is
/// broadcast to `IdleTimerHandle::transitions` subscribers.
pub fn spawn_idle_timer(config: TimerConfig, callbacks: Callbacks) -> (IdleTimerHandle, JoinHandle<()>) {
    let (command_tx, command_rx) = mpsc::channel(64);
    let (transition_tx, _) = broadcast::channel(16);

    let handle = IdleTimerHandle {
        commands: command_tx,
        transitions: transition_tx.clone(),
    };
    let task = tokio::spawn(idle_timer_task(config, with_broadcast(callbacks, transition_tx), command_rx));
    (handle, task)
}

fn with_broadcast(callbacks: Callbacks, transitions: broadcast::Sender<Transition>) -> Callbacks {
    let Callbacks {
        mut on_idle,
        mut on_active,
        on_event,
    } = callbacks;
    let active_tx = transitions.clone();

    Callbacks {
        on_idle: Box::new(move |event: Option<&ActivityEvent>| {
            // No receivers is fine
            let _ = transitions.send(Transition::Idle);
            on_idle(event);
        }),
        on_active: Box::new(move |event: Option<&ActivityEvent>| {
            let _ = active_tx.send(Transition::Active);
            on_active(event);
        }),
        on_event,
    }
}

async fn idle_timer_task(config: TimerConfig, callbacks: Callbacks, mut commands: mpsc::Receiver<Command>) {
    info!("Starting idle timer task");

    let (fire_tx, mut fires) = mpsc::unbounded_channel::<TimerHandle>();
    let mut gate = EventGate::new();
    let mut core = IdleTimerCore::new(config, callbacks, MonotonicClock::new(), TokioScheduler::new(fire_tx));

    if let Err(e) = core.activate(&mut gate) {
        error!("Failed to activate idle timer: {}", e);
        return;
    }

    let mut shutdown_reply = None;
    loop {
        tokio::select! {
            Some(handle) = fires.recv() => {
                core.handle_timeout(handle);
            }

            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("All idle timer handles dropped");
                    break;
                };
                match command {
                    Command::Event(event, reply) => {
                        // Only subscribed kinds reach the timer
                        let counted = gate.accepts(event.kind) && core.handle_event(&event);
                        let _ = reply.send(counted);
                    }
                    Command::Reset(reply) => {
                        core.reset();
                        let _ = reply.send(core.snapshot());
                    }
                    Command::Pause(reply) => {
                        core.pause();
                        let _ = reply.send(core.snapshot());
                    }
                    Command::Resume(reply) => {
                        core.resume();
                        let _ = reply.send(core.snapshot());
                    }
                    Command::Snapshot(reply) => {
                        let _ = reply.send(core.snapshot());
                    }
                    Command::Shutdown(reply) => {
                        shutdown_reply = Some(reply);
                        break;
                    }
                }
            }
        }
    }

    if let Err(e) = core.deactivate(&mut gate) {
        error!("Failed to deactivate idle timer: {}", e);
    }
    drop(core);

    if let Some(reply) = shutdown_reply {
        let _ = reply.send(());
    }
    info!("Idle timer task stopped");
}
