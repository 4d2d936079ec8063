//! Idle detection state machine
//!
//! `IdleTimerCore` is either Active (an idle callback is armed `timeout`
//! after the last activity), Idle (nothing armed) or Paused (nothing armed,
//! remaining time frozen). Activity events and the armed callback both flip
//! the idle flag through the same toggle, which notifies exactly one of
//! `on_active`/`on_idle`.

pub mod filter;
pub mod lifecycle;

use tracing::{debug, info, trace};

use crate::{
    events::ActivityEvent,
    host::{Clock, Scheduler, TimeoutSlot, TimerHandle, Timestamp},
    state::{Callbacks, Mode, TimerConfig, TimerSnapshot, TimerState},
};

pub use filter::MOVE_DEBOUNCE_MS;

pub struct IdleTimerCore<C: Clock, S: Scheduler> {
    config: TimerConfig,
    callbacks: Callbacks,
    clock: C,
    scheduler: S,
    slot: TimeoutSlot,
    state: TimerState,
}

impl<C: Clock, S: Scheduler> IdleTimerCore<C, S> {
    pub fn new(config: TimerConfig, callbacks: Callbacks, clock: C, scheduler: S) -> Self {
        let state = TimerState::new(clock.now(), config.start_on_mount);
        Self {
            config,
            callbacks,
            clock,
            scheduler,
            slot: TimeoutSlot::new(),
            state,
        }
    }

    /// Entry point for every event the listener collaborator delivers.
    ///
    /// Returns whether the event counted as activity.
    pub fn handle_event(&mut self, event: &ActivityEvent) -> bool {
        let now = self.clock.now();
        if !filter::is_activity(&self.state, event, now) {
            trace!("Ignoring {} event", event.kind);
            return false;
        }

        self.slot.clear(&mut self.scheduler);
        if self.state.idle {
            self.toggle(Some(event));
        } else {
            (self.callbacks.on_event)(Some(event));
        }

        self.state.touch(now, event.position);
        self.slot.arm(&mut self.scheduler, self.config.timeout_ms);
        true
    }

    /// Called by the host when a scheduled callback comes due.
    ///
    /// Handles that are not the one currently armed (cancelled, replaced,
    /// or delivered after teardown) are ignored.
    pub fn handle_timeout(&mut self, handle: TimerHandle) {
        if !self.slot.fire(handle) {
            debug!("Ignoring stale idle callback {:?}", handle);
            return;
        }
        self.toggle(None);
    }

    /// Restart the timer from now and clear idle and paused modes.
    ///
    /// Does not notify `on_active`.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        self.slot.clear(&mut self.scheduler);
        self.state.restart(now);
        self.slot.arm(&mut self.scheduler, self.config.timeout_ms);
        debug!("Idle timer reset at {}", now);
    }

    /// Freeze the timer, remembering how long was left. No-op if already paused.
    pub fn pause(&mut self) {
        if self.state.is_paused() {
            return;
        }
        let remaining = self.remaining_time();
        self.slot.clear(&mut self.scheduler);
        self.state.remaining = Some(remaining);
        info!("Idle timer paused with {}ms remaining", remaining);
    }

    /// Continue after `pause`. No-op if not paused.
    ///
    /// An active timer fires after exactly the time that was left. A timer
    /// paused while idle stays idle and nothing is re-armed.
    pub fn resume(&mut self) {
        let Some(remaining) = self.state.remaining.take() else {
            return;
        };
        if !self.state.idle {
            self.slot.arm(&mut self.scheduler, remaining);
        }
        info!("Idle timer resumed, callback due in {}ms", remaining);
    }

    /// Milliseconds until the user is considered idle; 0 once idle.
    ///
    /// Measured from the last activity, so after `resume` it can read lower
    /// than the delay of the re-armed callback.
    pub fn remaining_time(&self) -> u64 {
        if self.state.idle {
            return 0;
        }
        if let Some(remaining) = self.state.remaining {
            return remaining;
        }

        let since_active = self.clock.now().saturating_sub(self.state.last_active);
        self.config.timeout_ms.saturating_sub(since_active)
    }

    /// Milliseconds since the last reset
    pub fn elapsed_time(&self) -> u64 {
        self.clock.now().saturating_sub(self.state.epoch_start)
    }

    pub fn last_active_time(&self) -> Timestamp {
        self.state.last_active
    }

    pub fn is_idle(&self) -> bool {
        self.state.idle
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode(),
            idle: self.is_idle(),
            paused: self.is_paused(),
            timeout_ms: self.config.timeout_ms,
            remaining_ms: self.remaining_time(),
            elapsed_ms: self.elapsed_time(),
            last_active: self.last_active_time(),
        }
    }

    fn toggle(&mut self, event: Option<&ActivityEvent>) {
        let was_idle = self.state.idle;
        self.state.idle = !was_idle;
        if was_idle {
            info!("User is active");
            (self.callbacks.on_active)(event);
        } else {
            info!("User is idle");
            (self.callbacks.on_idle)(event);
        }
    }
}

impl<C: Clock, S: Scheduler> Drop for IdleTimerCore<C, S> {
    fn drop(&mut self) {
        self.slot.clear(&mut self.scheduler);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use super::*;
    use crate::{
        events::EventKind,
        host::{EventGate, VirtualClock, VirtualScheduler, VirtualTime},
    };

    type Core = IdleTimerCore<VirtualClock, VirtualScheduler>;
    type Seen = Arc<Mutex<Vec<Option<ActivityEvent>>>>;

    /// Records the argument of every idle/active notification
    #[derive(Default, Clone)]
    struct Counts {
        idle: Seen,
        active: Seen,
        event: Arc<AtomicUsize>,
    }

    impl Counts {
        fn callbacks(&self) -> Callbacks {
            let (idle, active, event) = (self.idle.clone(), self.active.clone(), self.event.clone());
            Callbacks::new()
                .on_idle(move |ev| idle.lock().unwrap().push(ev.cloned()))
                .on_active(move |ev| active.lock().unwrap().push(ev.cloned()))
                .on_event(move |_| {
                    event.fetch_add(1, Ordering::SeqCst);
                })
        }

        fn idle(&self) -> usize {
            self.idle.lock().unwrap().len()
        }

        fn active(&self) -> usize {
            self.active.lock().unwrap().len()
        }

        fn event(&self) -> usize {
            self.event.load(Ordering::SeqCst)
        }
    }

    struct Harness {
        time: VirtualTime,
        gate: EventGate,
        counts: Counts,
        core: Core,
    }

    impl Harness {
        fn new(config: TimerConfig) -> Self {
            let time = VirtualTime::new();
            let counts = Counts::default();
            let mut gate = EventGate::new();
            let mut core = IdleTimerCore::new(config, counts.callbacks(), time.clock(), time.scheduler());
            core.activate(&mut gate).unwrap();
            Self { time, gate, counts, core }
        }

        fn with_timeout(timeout_ms: u64) -> Self {
            Self::new(TimerConfig::with_timeout(timeout_ms))
        }

        fn at(&mut self, t: Timestamp) -> &mut Core {
            self.time.advance_to(&mut self.core, t);
            &mut self.core
        }
    }

    fn key() -> ActivityEvent {
        ActivityEvent::new(EventKind::KeyDown)
    }

    #[test]
    fn goes_idle_after_timeout_and_wakes_on_key_down() {
        let mut h = Harness::with_timeout(1000);
        assert!(!h.core.is_idle());
        assert_eq!(h.gate.subscribed(), EventKind::ALL.len());

        assert!(!h.at(999).is_idle());
        assert!(h.at(1001).is_idle());
        assert_eq!(h.counts.idle(), 1);
        assert_eq!(h.core.remaining_time(), 0);

        assert!(h.at(1500).handle_event(&key()));
        assert!(!h.core.is_idle());
        assert_eq!(h.counts.active(), 1);
        assert_eq!(h.counts.idle(), 1);
        assert_eq!(h.core.remaining_time(), 1000);
        assert_eq!(h.core.last_active_time(), 1500);

        assert_eq!(h.counts.idle.lock().unwrap()[0], None);
        assert_eq!(h.counts.active.lock().unwrap()[0], Some(key()));
    }

    #[test]
    fn pause_freezes_remaining_and_resume_keeps_progress() {
        let mut h = Harness::with_timeout(1000);

        h.at(300).pause();
        assert_eq!(h.core.remaining_time(), 700);
        assert_eq!(h.core.mode(), Mode::Paused);
        assert_eq!(h.time.pending(), 0);

        assert!(!h.at(5000).is_idle());
        assert_eq!(h.core.remaining_time(), 700);

        h.core.resume();
        assert_eq!(h.time.pending(), 1);
        assert!(!h.at(5699).is_idle());
        assert!(h.at(5701).is_idle());
        assert_eq!(h.counts.idle(), 1);
    }

    #[test]
    fn remaining_time_after_resume_counts_from_last_activity() {
        let mut h = Harness::with_timeout(1000);
        h.at(300).pause();
        h.at(5000).resume();

        assert_eq!(h.core.last_active_time(), 0);
        assert_eq!(h.core.remaining_time(), 0);
        assert!(!h.at(5400).is_idle());
        assert_eq!(h.core.remaining_time(), 0);

        assert!(h.at(5500).handle_event(&key()));
        assert_eq!(h.core.remaining_time(), 1000);
    }

    #[test]
    fn pause_then_resume_changes_nothing() {
        let mut h = Harness::with_timeout(1000);
        h.at(400);
        let before = h.core.remaining_time();

        h.core.pause();
        h.core.resume();

        assert_eq!(h.core.remaining_time(), before);
        assert_eq!(h.time.pending(), 1);
        assert_eq!((h.counts.idle(), h.counts.active()), (0, 0));
    }

    #[test]
    fn double_pause_and_double_resume_are_noops() {
        let mut h = Harness::with_timeout(1000);

        h.at(100).pause();
        h.at(600).pause();
        assert_eq!(h.core.remaining_time(), 900);

        h.core.resume();
        h.core.resume();
        assert_eq!(h.time.pending(), 1);
        assert_eq!(h.core.remaining_time(), 400);
        assert!(!h.at(1499).is_idle());
        assert!(h.at(1500).is_idle());
    }

    #[test]
    fn reset_while_idle_does_not_notify() {
        let mut h = Harness::with_timeout(1000);
        assert!(h.at(2000).is_idle());

        h.core.reset();
        assert!(!h.core.is_idle());
        assert_eq!(h.counts.active(), 0);
        assert_eq!(h.core.elapsed_time(), 0);
        assert_eq!(h.core.last_active_time(), 2000);
        assert_eq!(h.core.remaining_time(), 1000);
    }

    #[test]
    fn reset_while_paused_unpauses() {
        let mut h = Harness::with_timeout(1000);
        h.at(100).pause();
        h.at(400).reset();
        assert!(!h.core.is_paused());
        assert_eq!(h.core.remaining_time(), 1000);
        assert!(h.at(1400).is_idle());
    }

    #[test]
    fn activity_keeps_user_active_and_notifies_on_event() {
        let mut h = Harness::with_timeout(1000);
        for t in [500, 1200, 1900] {
            assert!(h.at(t).handle_event(&key()));
        }
        assert!(!h.at(2800).is_idle());
        assert_eq!(h.counts.event(), 3);
        assert_eq!(h.counts.active(), 0);
        assert_eq!(h.time.pending(), 1);

        assert!(h.at(2900).is_idle());
        assert_eq!(h.counts.idle(), 1);
    }

    #[test]
    fn idle_fires_once_per_silence_period() {
        let mut h = Harness::with_timeout(1000);
        h.at(10_000);
        assert_eq!(h.counts.idle(), 1);

        h.at(10_500).handle_event(&key());
        h.at(30_000);
        assert_eq!(h.counts.idle(), 2);
        assert_eq!(h.counts.active(), 1);
    }

    #[test]
    fn repeated_pointer_position_is_ignored() {
        let mut h = Harness::with_timeout(1000);
        let here = ActivityEvent::at(EventKind::MouseMove, 40.0, 2.0);

        assert!(h.at(300).handle_event(&here));
        let remaining = h.at(600).remaining_time();

        assert!(!h.core.handle_event(&here));
        assert_eq!(h.core.last_active_time(), 300);
        assert_eq!(h.core.remaining_time(), remaining);
        assert!(h.at(1300).is_idle());
    }

    #[test]
    fn pointer_move_right_after_reset_is_ignored() {
        let mut h = Harness::with_timeout(1000);
        let event = ActivityEvent::at(EventKind::MouseMove, 1.0, 1.0);

        assert!(!h.at(150).handle_event(&event));
        assert_eq!(h.core.last_active_time(), 0);

        assert!(h.at(250).handle_event(&event));
        assert_eq!(h.core.last_active_time(), 250);
    }

    #[test]
    fn pointer_move_without_position_is_ignored() {
        let mut h = Harness::with_timeout(1000);
        assert!(!h.at(500).handle_event(&ActivityEvent::new(EventKind::MouseMove)));
        assert_eq!(h.core.last_active_time(), 0);
    }

    #[test]
    fn events_while_paused_are_ignored() {
        let mut h = Harness::with_timeout(1000);
        h.at(100).pause();
        assert!(!h.at(200).handle_event(&key()));
        assert_eq!(h.core.remaining_time(), 900);
        assert_eq!(h.counts.event(), 0);
    }

    #[test]
    fn resume_from_idle_stays_idle_without_rearming() {
        let mut h = Harness::with_timeout(1000);
        h.at(1500).pause();
        assert_eq!(h.core.remaining_time(), 0);

        h.core.resume();
        assert!(h.core.is_idle());
        assert!(!h.core.is_paused());
        assert_eq!(h.time.pending(), 0);

        assert!(h.at(1800).handle_event(&key()));
        assert_eq!(h.counts.active(), 1);
    }

    #[test]
    fn remaining_time_stays_within_bounds() {
        let mut h = Harness::with_timeout(1000);
        for t in (0..3000).step_by(37) {
            let core = h.at(t);
            let remaining = core.remaining_time();
            assert!(remaining <= 1000);
            if core.is_idle() {
                assert_eq!(remaining, 0);
            }
            if t % 370 == 0 {
                core.handle_event(&key());
            }
        }
    }

    #[test]
    fn elapsed_time_counts_from_reset() {
        let mut h = Harness::with_timeout(1000);
        h.at(400).handle_event(&key());
        assert_eq!(h.core.elapsed_time(), 400);
        h.at(900).reset();
        assert_eq!(h.at(1000).elapsed_time(), 100);
    }

    #[test]
    fn starts_idle_when_not_started_on_mount() {
        let config = TimerConfig {
            timeout_ms: 1000,
            start_on_mount: false,
            ..TimerConfig::default()
        };
        let mut h = Harness::new(config);
        assert!(h.core.is_idle());
        assert_eq!(h.time.pending(), 0);

        assert!(h.at(50).handle_event(&key()));
        assert!(!h.core.is_idle());
        assert_eq!(h.counts.active(), 1);
        assert!(h.at(1050).is_idle());
    }

    #[test]
    fn deactivate_cancels_pending_callback() {
        let mut h = Harness::with_timeout(1000);
        h.at(100);
        h.core.deactivate(&mut h.gate).unwrap();

        assert_eq!(h.gate.subscribed(), 0);
        assert_eq!(h.time.pending(), 0);
        assert!(!h.at(5000).is_idle());
        assert_eq!(h.counts.idle(), 0);
    }

    #[test]
    fn stale_handle_is_ignored() {
        let mut h = Harness::with_timeout(1000);
        h.core.handle_timeout(TimerHandle(9_999));
        assert!(!h.core.is_idle());
        assert_eq!(h.counts.idle(), 0);
    }

    #[test]
    fn dropping_the_core_cancels_its_callback() {
        let h = Harness::with_timeout(1000);
        let time = h.time.clone();
        assert_eq!(time.pending(), 1);
        drop(h);
        assert_eq!(time.pending(), 0);
    }
}
