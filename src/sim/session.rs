//! Session clock: countdown, timed play, terminal score freeze

use serde::{Deserialize, Serialize};

use super::state::GameEvent;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Pre-game countdown; accepts no attempt reports
    Countdown,
    /// Play clock runs down; hits score
    Running,
    /// Terminal; score frozen
    Ended,
}

/// Timed session state machine
///
/// Linear Countdown -> Running -> Ended; no cycles, no re-entry. Attempt
/// reports and the timer decrement both land within the same tick, so the
/// two can never interleave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClock {
    pub phase: SessionPhase,
    /// Countdown seconds left before the go-hold
    countdown_left: f32,
    /// "START!" hold seconds left after the countdown
    go_hold_left: f32,
    /// Play seconds left; decreases only while Running, clamped at zero
    remaining: f32,
    score: u32,
    session_secs: f32,
}

impl SessionClock {
    pub fn new(countdown_secs: f32, go_hold_secs: f32, session_secs: f32) -> Self {
        Self {
            phase: SessionPhase::Countdown,
            countdown_left: countdown_secs,
            go_hold_left: go_hold_secs,
            remaining: session_secs,
            score: 0,
            session_secs,
        }
    }

    /// Advance by one tick
    pub fn tick(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        match self.phase {
            SessionPhase::Countdown => {
                if self.countdown_left > 0.0 {
                    self.countdown_left = (self.countdown_left - dt).max(0.0);
                } else {
                    self.go_hold_left -= dt;
                    if self.go_hold_left <= 0.0 {
                        self.phase = SessionPhase::Running;
                        self.remaining = self.session_secs;
                        events.push(GameEvent::SessionStarted);
                        log::info!("session: running, {:.0}s on the clock", self.remaining);
                    }
                }
            }
            SessionPhase::Running => {
                self.remaining = (self.remaining - dt).max(0.0);
                if self.remaining == 0.0 {
                    self.phase = SessionPhase::Ended;
                    events.push(GameEvent::SessionEnded { score: self.score });
                    log::info!("session: ended, score={}", self.score);
                }
            }
            SessionPhase::Ended => {}
        }
    }

    /// Record a hit/miss report from the selection engine.
    ///
    /// Only hits while Running score; the countdown accepts no events and
    /// the score is frozen once Ended. Misses never decrease the score.
    pub fn record_attempt(&mut self, hit: bool) {
        if hit && self.phase == SessionPhase::Running {
            self.score += 1;
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Play seconds left (clamped at zero)
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Countdown digit to display while counting (3, 2, 1)
    pub fn countdown_digit(&self) -> Option<u32> {
        if self.phase == SessionPhase::Countdown && self.countdown_left > 0.0 {
            Some(self.countdown_left.ceil() as u32)
        } else {
            None
        }
    }

    /// True during the brief "START!" hold before Running
    pub fn in_go_hold(&self) -> bool {
        self.phase == SessionPhase::Countdown && self.countdown_left == 0.0
    }
}
