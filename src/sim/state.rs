//! Game state composition and event channel
//!
//! All state for a single session lives here: the target field, the
//! selection engine, the session clock, and the RNG stream that feeds
//! round generation.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::results::FinalScore;
use crate::settings::Settings;

use super::field::TargetField;
use super::select::SelectionEngine;
use super::session::SessionClock;

/// Multicast notifications from the simulation to its subscribers.
///
/// Producers push during a tick; shells drain once per frame via
/// [`GameState::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A round was (re)generated and published
    RoundReady { count: usize },
    /// Correct selection connected
    Hit { target: u32 },
    /// Wrong selection; the round is being discarded
    Miss { target: u32 },
    /// Every target in the round was connected
    RoundComplete,
    /// Countdown finished; the play clock is running
    SessionStarted,
    /// Play clock expired; score is final
    SessionEnded { score: u32 },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Live RNG stream; advances across regenerations so consecutive
    /// rounds are independent draws
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub field: TargetField,
    pub selection: SelectionEngine,
    pub clock: SessionClock,
    /// Seconds left on the shared MISS message slot
    pub miss_message_secs: f32,
    /// Configured MISS message display time
    pub miss_message_duration: f32,
    /// Write-once final-score hand-off
    pub result: FinalScore,
    /// Notifications accumulated since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    /// Create a session from explicit settings.
    ///
    /// The first round is generated here; the selection engine initializes
    /// from it on the first tick.
    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut events = Vec::new();

        let mut field = TargetField::new(settings.target_count, settings.bounds, settings.hit_radius);
        field.generate_round(&mut rng, &mut events);

        let mut selection =
            SelectionEngine::new(settings.link_anim_secs, settings.complete_pause_secs);
        selection.await_round();

        Self {
            seed,
            rng,
            time_ticks: 0,
            field,
            selection,
            clock: SessionClock::new(
                settings.countdown_secs,
                settings.go_hold_secs,
                settings.session_secs,
            ),
            miss_message_secs: 0.0,
            miss_message_duration: settings.miss_message_secs,
            result: FinalScore::new(),
            events,
        }
    }

    /// Drain the events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_publishes_first_round() {
        let mut state = GameState::new(42);

        assert_eq!(state.field.len(), 5);
        assert!(state.selection.pending_init());
        assert_eq!(state.take_events(), vec![GameEvent::RoundReady { count: 5 }]);
        // Drained
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_result_defaults_to_zero() {
        let state = GameState::new(42);
        assert_eq!(state.result.get(), 0);
        assert!(!state.result.is_published());
    }
}
