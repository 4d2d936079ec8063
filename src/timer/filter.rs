//! Decides whether a raw event counts as user activity

use crate::{
    events::{ActivityEvent, EventKind},
    host::Timestamp,
    state::TimerState,
};

/// Pointer moves this soon after a reset are treated as synthetic noise
pub const MOVE_DEBOUNCE_MS: u64 = 200;

/// Whether `event` should count as activity at `now`.
///
/// Paused timers ignore everything. Pointer moves must carry coordinates,
/// must actually move, and must arrive outside the debounce window that
/// follows a reset. Every other kind passes.
pub fn is_activity(state: &TimerState, event: &ActivityEvent, now: Timestamp) -> bool {
    if state.is_paused() {
        return false;
    }
    if event.kind != EventKind::MouseMove {
        return true;
    }

    let Some(position) = event.position else {
        return false;
    };
    if state.last_position == Some(position) {
        return false;
    }

    now.saturating_sub(state.epoch_start) >= MOVE_DEBOUNCE_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Position;

    fn settled() -> TimerState {
        let mut state = TimerState::new(0, true);
        state.last_position = Some(Position::new(10.0, 10.0));
        state
    }

    #[test]
    fn non_move_events_always_count() {
        let state = settled();
        assert!(is_activity(&state, &ActivityEvent::new(EventKind::KeyDown), 0));
        assert!(is_activity(&state, &ActivityEvent::new(EventKind::TouchMove), 5));
    }

    #[test]
    fn paused_timer_ignores_everything() {
        let mut state = settled();
        state.remaining = Some(100);
        assert!(!is_activity(&state, &ActivityEvent::new(EventKind::KeyDown), 1_000));
    }

    #[test]
    fn move_to_same_position_is_not_activity() {
        let state = settled();
        let event = ActivityEvent::at(EventKind::MouseMove, 10.0, 10.0);
        assert!(!is_activity(&state, &event, 5_000));
    }

    #[test]
    fn move_without_coordinates_is_not_activity() {
        let state = settled();
        assert!(!is_activity(&state, &ActivityEvent::new(EventKind::MouseMove), 5_000));
    }

    #[test]
    fn move_inside_debounce_window_is_not_activity() {
        let state = settled();
        let event = ActivityEvent::at(EventKind::MouseMove, 11.0, 10.0);
        assert!(!is_activity(&state, &event, MOVE_DEBOUNCE_MS - 1));
        assert!(is_activity(&state, &event, MOVE_DEBOUNCE_MS));
    }
}
