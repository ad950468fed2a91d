//! Target field: round generation and ownership
//!
//! Owns the selectable targets for the current round. Every other component
//! holds target ids only; a regeneration replaces the whole set and ids are
//! never reused.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HALF_HEIGHT, FIELD_HALF_WIDTH};

use super::state::GameEvent;

/// Visual state of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetState {
    Normal,
    /// Designated round start
    Start,
    /// Connected by a correct selection
    Visited,
    /// Connected by a wrong selection
    Miss,
}

/// A selectable point in the current round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    pub state: TargetState,
}

/// Axis-aligned rectangle targets are scattered in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Draw a uniform position inside the rectangle
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(self.min.x..=self.max.x),
            rng.random_range(self.min.y..=self.max.y),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec2::new(-FIELD_HALF_WIDTH, -FIELD_HALF_HEIGHT),
            max: Vec2::new(FIELD_HALF_WIDTH, FIELD_HALF_HEIGHT),
        }
    }
}

/// Owns the target set and designated start for the active round
#[derive(Debug, Clone)]
pub struct TargetField {
    targets: Vec<Target>,
    start_id: Option<u32>,
    count: usize,
    bounds: Bounds,
    hit_radius: f32,
    next_id: u32,
}

impl TargetField {
    pub fn new(count: usize, bounds: Bounds, hit_radius: f32) -> Self {
        Self {
            targets: Vec::new(),
            start_id: None,
            count,
            bounds,
            hit_radius,
            next_id: 1,
        }
    }

    /// Generate a fresh round: `count` uniform targets, one picked uniformly
    /// as the start.
    ///
    /// The previous round is discarded wholesale. `RoundReady` fires even for
    /// an empty round so subscribers can handle the null-start case instead
    /// of waiting forever.
    pub fn generate_round<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) {
        self.targets.clear();
        self.start_id = None;

        for _ in 0..self.count {
            let id = self.next_target_id();
            self.targets.push(Target {
                id,
                pos: self.bounds.sample(rng),
                state: TargetState::Normal,
            });
        }

        if !self.targets.is_empty() {
            let pick = rng.random_range(0..self.targets.len());
            let start = &mut self.targets[pick];
            start.state = TargetState::Start;
            self.start_id = Some(start.id);
        }

        events.push(GameEvent::RoundReady {
            count: self.targets.len(),
        });
        log::info!(
            "field: round generated, count={} start={:?}",
            self.targets.len(),
            self.start_id
        );
    }

    /// Re-generate with the same count and bounds (after a miss or a clear)
    pub fn reset_round<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) {
        self.generate_round(rng, events);
    }

    fn next_target_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Designated start target of the published round, if any
    pub fn start_id(&self) -> Option<u32> {
        self.start_id
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Published round targets, in stable storage order
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn get(&self, id: u32) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Update a target's visual state. Positions never change once the round
    /// is published.
    pub fn set_state(&mut self, id: u32, state: TargetState) {
        if let Some(target) = self.targets.iter_mut().find(|t| t.id == id) {
            target.state = state;
        }
    }

    /// Resolve a pointer position to the target occupying it, if any.
    ///
    /// Shell-side helper: the simulation itself only ever consumes resolved
    /// target ids.
    pub fn target_at(&self, pos: Vec2) -> Option<u32> {
        let r2 = self.hit_radius * self.hit_radius;
        self.targets
            .iter()
            .find(|t| t.pos.distance_squared(pos) <= r2)
            .map(|t| t.id)
    }
}

#[cfg(test)]
impl TargetField {
    /// Test fixture with explicit positions; `start` indexes `positions`.
    pub(crate) fn with_layout(positions: &[Vec2], start: usize) -> Self {
        let targets: Vec<Target> = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| Target {
                id: i as u32 + 1,
                pos,
                state: if i == start {
                    TargetState::Start
                } else {
                    TargetState::Normal
                },
            })
            .collect();
        Self {
            start_id: targets.get(start).map(|t| t.id),
            next_id: targets.len() as u32 + 1,
            count: targets.len(),
            targets,
            bounds: Bounds::default(),
            hit_radius: crate::consts::HIT_RADIUS,
        }
    }
}
