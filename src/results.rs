//! Final score hand-off
//!
//! The session's single result value: written once when the clock ends,
//! read by the results display. Defaults to 0 until published.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Write-once/read-many slot for the final score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    value: Option<u32>,
}

impl FinalScore {
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Publish the final score. Only the first write sticks; later writes
    /// are logged and dropped.
    pub fn publish(&mut self, score: u32) -> bool {
        if self.value.is_some() {
            log::warn!("results: final score already published, ignoring {score}");
            return false;
        }
        self.value = Some(score);
        log::info!("results: final score {score}");
        true
    }

    pub fn is_published(&self) -> bool {
        self.value.is_some()
    }

    /// The published score, or 0 if the session never ended
    pub fn get(&self) -> u32 {
        self.value.unwrap_or(0)
    }
}

/// Persisted result document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct SavedResult {
    score: u32,
}

/// Write the final score to `path` as a small JSON document
pub fn save_to(path: &Path, score: u32) {
    match serde_json::to_string(&SavedResult { score }) {
        Ok(json) => {
            if let Err(e) = fs::write(path, json) {
                log::warn!("results: failed to write {}: {e}", path.display());
            } else {
                log::info!("results: saved score {score} to {}", path.display());
            }
        }
        Err(e) => log::warn!("results: failed to encode result: {e}"),
    }
}

/// Read a previously saved final score; 0 when absent or unreadable
pub fn load_from(path: &Path) -> u32 {
    match fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str::<SavedResult>(&json) {
            Ok(doc) => doc.score,
            Err(e) => {
                log::warn!("results: corrupt result file {}: {e}", path.display());
                0
            }
        },
        Err(_) => 0,
    }
}
