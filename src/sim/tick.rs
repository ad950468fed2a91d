//! Fixed timestep simulation tick
//!
//! Single thread of control: every state transition happens here, in
//! response to the per-tick clock or the tick's input event. Each state
//! machine is mutated only from its own section of the tick.

use super::select::Attempt;
use super::session::SessionPhase;
use super::state::{GameEvent, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Resolved target the pointer selected this tick, if any
    pub select: Option<u32>,
    /// Demo mode: the engine plays its own correct-next target
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    // Deferred re-init: runs the tick after the round-ready notification,
    // never in the same dispatch.
    if state.selection.pending_init() {
        state.selection.init(&state.field);
    }

    // Session clock first; attempt reports and the timer decrement both
    // land within this one tick.
    state.clock.tick(dt, &mut state.events);
    if state.clock.phase == SessionPhase::Ended && !state.result.is_published() {
        state.result.publish(state.clock.score());
    }

    // The shared MISS message slot decays regardless of round churn;
    // clearing stale text is harmless.
    state.miss_message_secs = (state.miss_message_secs - dt).max(0.0);

    // In-flight link segment
    if let Some(link) = state.selection.advance_animation(dt) {
        match link.verdict {
            Attempt::Hit => {
                let complete = state.selection.commit_hit(&mut state.field, &link);
                state.clock.record_attempt(true);
                state.events.push(GameEvent::Hit {
                    target: link.target,
                });
                if complete {
                    state.events.push(GameEvent::RoundComplete);
                    state.selection.schedule_reset();
                    log::info!("select: all targets connected");
                }
            }
            Attempt::Miss => {
                state.selection.commit_miss(&mut state.field, &link);
                state.clock.record_attempt(false);
                state.events.push(GameEvent::Miss {
                    target: link.target,
                });
                state.miss_message_secs = state.miss_message_duration;
                // The whole round is discarded on any single mistake.
                state.field.reset_round(&mut state.rng, &mut state.events);
                state.selection.await_round();
            }
        }
    }

    // Post-clear pause elapsed: regenerate
    if state.selection.reset_due(dt) {
        state.field.reset_round(&mut state.rng, &mut state.events);
        state.selection.await_round();
    }

    // Input dispatch
    let select = if input.autopilot {
        autopilot_select(state)
    } else {
        input.select
    };
    if let Some(id) = select {
        state.selection.on_select(&state.field, id);
    }
}

/// Demo AI: play the engine's own correct-next target while the clock runs
fn autopilot_select(state: &GameState) -> Option<u32> {
    if state.clock.phase != SessionPhase::Running || state.selection.is_animating() {
        return None;
    }
    state.selection.next_from_current(&state.field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;

    fn run_ticks(state: &mut GameState, n: u32, events: &mut Vec<GameEvent>) {
        let input = TickInput::default();
        for _ in 0..n {
            tick(state, &input, SIM_DT);
            events.append(&mut state.take_events());
        }
    }

    fn run_until_running(state: &mut GameState, events: &mut Vec<GameEvent>) {
        for _ in 0..10_000 {
            if state.clock.phase == SessionPhase::Running {
                return;
            }
            run_ticks(state, 1, events);
        }
        panic!("session never started running");
    }

    /// Selects `id` and runs ticks until the segment lands
    fn click(state: &mut GameState, id: u32, events: &mut Vec<GameEvent>) {
        let input = TickInput {
            select: Some(id),
            ..Default::default()
        };
        tick(state, &input, SIM_DT);
        events.append(&mut state.take_events());
        for _ in 0..1_000 {
            if !state.selection.is_animating() {
                return;
            }
            run_ticks(state, 1, events);
        }
        panic!("link animation never completed");
    }

    fn count_round_ready(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::RoundReady { .. }))
            .count()
    }

    #[test]
    fn test_first_tick_defers_init_then_seeds_selection() {
        let mut state = GameState::new(7);
        assert!(state.selection.pending_init());

        let mut events = Vec::new();
        run_ticks(&mut state, 1, &mut events);

        assert!(!state.selection.pending_init());
        assert_eq!(state.selection.current(), state.field.start_id());
        assert_eq!(state.selection.visited().len(), 1);
    }

    #[test]
    fn test_perfect_round_scores_four_and_resets_once() {
        let mut state = GameState::new(1234);
        let mut events = Vec::new();
        run_until_running(&mut state, &mut events);
        events.clear();

        // Connect the remaining four targets in correct order
        for _ in 0..4 {
            let next = state
                .selection
                .next_from_current(&state.field)
                .expect("unvisited targets remain");
            click(&mut state, next, &mut events);
        }

        assert_eq!(state.clock.score(), 4);
        assert_eq!(state.selection.visited().len(), 5);
        assert!(events.contains(&GameEvent::RoundComplete));
        assert_eq!(count_round_ready(&events), 0);

        // The completion pause elapses, then exactly one reset fires
        run_ticks(&mut state, 120, &mut events);
        assert_eq!(count_round_ready(&events), 1);
        assert_eq!(state.selection.visited().len(), 1);
        assert_eq!(state.selection.current(), state.field.start_id());
    }

    #[test]
    fn test_miss_keeps_score_and_regenerates_round() {
        let mut state = GameState::new(99);
        let mut events = Vec::new();
        run_until_running(&mut state, &mut events);

        let correct = state.selection.next_from_current(&state.field).unwrap();
        let current = state.selection.current().unwrap();
        let wrong = state
            .field
            .targets()
            .iter()
            .map(|t| t.id)
            .find(|&id| id != correct && id != current)
            .expect("five targets leave a wrong choice");
        events.clear();

        click(&mut state, wrong, &mut events);

        assert_eq!(state.clock.score(), 0);
        assert!(events.contains(&GameEvent::Miss { target: wrong }));
        assert_eq!(count_round_ready(&events), 1);
        assert!(state.miss_message_secs > 0.0);

        // Rebuilt state after the deferred re-init; same round parameters
        run_ticks(&mut state, 1, &mut events);
        assert_eq!(state.field.len(), 5);
        assert_eq!(state.selection.visited().len(), 1);
        assert_eq!(state.selection.visited()[0], state.field.start_id().unwrap());
    }

    #[test]
    fn test_hits_during_countdown_do_not_score() {
        let mut state = GameState::new(5);
        let mut events = Vec::new();
        run_ticks(&mut state, 1, &mut events);
        assert_eq!(state.clock.phase, SessionPhase::Countdown);

        let next = state.selection.next_from_current(&state.field).unwrap();
        click(&mut state, next, &mut events);

        assert!(events.contains(&GameEvent::Hit { target: next }));
        assert_eq!(state.clock.score(), 0);
    }

    #[test]
    fn test_idle_session_ends_with_zero_score() {
        let mut state = GameState::new(31337);
        let mut events = Vec::new();

        // 3s countdown + 0.5s go-hold + 30s play, with margin
        run_ticks(&mut state, (34.0 / SIM_DT) as u32, &mut events);

        assert_eq!(state.clock.phase, SessionPhase::Ended);
        assert_eq!(state.clock.remaining(), 0.0);
        assert_eq!(state.clock.score(), 0);
        assert!(events.contains(&GameEvent::SessionEnded { score: 0 }));
        assert!(state.result.is_published());
        assert_eq!(state.result.get(), 0);

        // Terminal: late reports and further ticks change nothing
        state.clock.record_attempt(true);
        run_ticks(&mut state, 120, &mut events);
        assert_eq!(state.clock.score(), 0);
        assert_eq!(state.result.get(), 0);
    }

    #[test]
    fn test_autopilot_accumulates_score() {
        let mut state = GameState::new(2024);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        // Full session on autopilot
        let total = (34.0 / SIM_DT) as u32;
        for _ in 0..total {
            tick(&mut state, &input, SIM_DT);
        }

        assert_eq!(state.clock.phase, SessionPhase::Ended);
        assert!(state.clock.score() > 0);
        assert_eq!(state.result.get(), state.clock.score());
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and input script match exactly
        let mut a = GameState::new(424242);
        let mut b = GameState::new(424242);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..(10.0 / SIM_DT) as u32 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.clock.score(), b.clock.score());
        assert_eq!(a.selection.visited(), b.selection.visited());
        assert_eq!(a.field.targets(), b.field.targets());
    }

    #[test]
    fn test_zero_target_rounds_regenerate_without_stalling() {
        let settings = Settings {
            target_count: 0,
            ..Settings::default()
        };
        let mut state = GameState::with_settings(8, &settings);
        let mut events = Vec::new();

        run_ticks(&mut state, (5.0 / SIM_DT) as u32, &mut events);

        // Empty rounds count as complete and keep cycling
        assert!(count_round_ready(&events) > 2);
        assert_eq!(state.clock.phase, SessionPhase::Running);
        assert_eq!(state.clock.score(), 0);
    }

    #[test]
    fn test_selection_ignored_while_segment_in_flight() {
        let mut state = GameState::new(77);
        let mut events = Vec::new();
        run_until_running(&mut state, &mut events);

        let first = state.selection.next_from_current(&state.field).unwrap();
        let input = TickInput {
            select: Some(first),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.selection.is_animating());

        // A different selection mid-flight is dropped
        let other = state
            .field
            .targets()
            .iter()
            .map(|t| t.id)
            .find(|&id| id != first)
            .unwrap();
        let input = TickInput {
            select: Some(other),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.selection.animation().unwrap().target, first);
    }
}
