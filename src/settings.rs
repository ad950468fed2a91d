//! Run configuration
//!
//! Defaults match the reference behavior: five targets in a [-4,4] x [-3,3]
//! field, a 3 second countdown, a 30 second session. Loading never fails;
//! it falls back to defaults and logs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Bounds;

/// Session and round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Targets per round
    pub target_count: usize,
    /// Field rectangle targets are scattered in
    pub bounds: Bounds,
    /// Pointer hit radius around a target center
    pub hit_radius: f32,
    /// Pre-game countdown length
    pub countdown_secs: f32,
    /// "START!" hold after the countdown
    pub go_hold_secs: f32,
    /// Play time limit
    pub session_secs: f32,
    /// Link segment draw time
    pub link_anim_secs: f32,
    /// MISS message display time
    pub miss_message_secs: f32,
    /// Pause after a cleared round before the next one generates
    pub complete_pause_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_count: TARGET_COUNT,
            bounds: Bounds::default(),
            hit_radius: HIT_RADIUS,
            countdown_secs: COUNTDOWN_SECS,
            go_hold_secs: GO_HOLD_SECS,
            session_secs: SESSION_SECS,
            link_anim_secs: LINK_ANIM_SECS,
            miss_message_secs: MISS_MESSAGE_SECS,
            complete_pause_secs: COMPLETE_PAUSE_SECS,
        }
    }
}

impl Settings {
    /// Clamp nonsensical values (negative durations, inverted bounds)
    pub fn sanitized(mut self) -> Self {
        self.hit_radius = self.hit_radius.max(0.0);
        self.countdown_secs = self.countdown_secs.max(0.0);
        self.go_hold_secs = self.go_hold_secs.max(0.0);
        self.session_secs = self.session_secs.max(0.0);
        self.link_anim_secs = self.link_anim_secs.max(0.0);
        self.miss_message_secs = self.miss_message_secs.max(0.0);
        self.complete_pause_secs = self.complete_pause_secs.max(0.0);
        if self.bounds.min.x > self.bounds.max.x || self.bounds.min.y > self.bounds.max.y {
            log::warn!("settings: inverted bounds, using the default field");
            self.bounds = Bounds::default();
        }
        self
    }

    /// Load settings from a JSON file; defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("settings: loaded {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("settings: bad file {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("settings: no file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as JSON; failures are logged, not fatal
    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("settings: failed to write {}: {e}", path.display());
                }
            }
            Err(e) => log::warn!("settings: failed to encode: {e}"),
        }
    }
}
