//! Presentation bindings: one-way outputs from the core
//!
//! The renderer/UI reads these; the simulation never reads them back.

use crate::sim::{GameState, TargetState};

/// RGBA color, linear 0..1
pub type Color = [f32; 4];

pub const COLOR_NORMAL: Color = [1.0, 1.0, 1.0, 1.0];
pub const COLOR_START: Color = [1.0, 0.0, 0.0, 1.0];
pub const COLOR_VISITED: Color = [0.0, 1.0, 0.0, 1.0];
pub const COLOR_MISSED: Color = [0.0, 0.0, 1.0, 1.0];
/// Connecting path and its animated tip
pub const COLOR_PATH: Color = COLOR_VISITED;
/// MISS message text
pub const COLOR_MESSAGE: Color = COLOR_START;

/// Fill color for a target's visual state
pub fn target_color(state: TargetState) -> Color {
    match state {
        TargetState::Normal => COLOR_NORMAL,
        TargetState::Start => COLOR_START,
        TargetState::Visited => COLOR_VISITED,
        TargetState::Miss => COLOR_MISSED,
    }
}

/// Text bindings for the session HUD
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudModel {
    /// Countdown overlay: "3", "2", "1", "START!", or empty
    pub countdown: String,
    pub timer: String,
    pub score: String,
    /// Transient miss message; empty once cleared
    pub message: String,
}

impl HudModel {
    /// Snapshot the HUD strings from the current state
    pub fn from_state(state: &GameState) -> Self {
        let countdown = if let Some(digit) = state.clock.countdown_digit() {
            digit.to_string()
        } else if state.clock.in_go_hold() {
            "START!".to_string()
        } else {
            String::new()
        };

        Self {
            countdown,
            timer: format!("Time: {:.1}", state.clock.remaining()),
            score: format!("Score: {}", state.clock.score()),
            message: if state.miss_message_secs > 0.0 {
                "MISS".to_string()
            } else {
                String::new()
            },
        }
    }
}
