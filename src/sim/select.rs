//! Selection engine: nearest-unvisited validation and link animation
//!
//! Tracks player progress through the round: the visited sequence, the
//! current target, and the in-flight line segment. Re-initialized one tick
//! after every round regeneration.

use glam::Vec2;

use super::field::{TargetField, TargetState};

/// Verdict for a classified selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Hit,
    Miss,
}

/// An in-flight link segment, interpolated over a fixed duration
#[derive(Debug, Clone, Copy)]
pub struct LinkAnimation {
    /// Selected target the segment is drawn toward
    pub target: u32,
    pub from: Vec2,
    pub to: Vec2,
    /// 0..1, advanced by dt / duration each tick
    pub progress: f32,
    pub verdict: Attempt,
}

impl LinkAnimation {
    /// Current tip position of the segment
    pub fn tip(&self) -> Vec2 {
        self.from.lerp(self.to, self.progress.min(1.0))
    }
}

/// A link segment whose animation has finished
#[derive(Debug, Clone, Copy)]
pub struct CompletedLink {
    pub target: u32,
    pub end: Vec2,
    pub verdict: Attempt,
}

/// Sequential-selection state machine over the active round
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    /// Target the next link starts from; `None` before initialization
    current: Option<u32>,
    /// Connected targets, insertion order significant; first is the start
    visited: Vec<u32>,
    /// Committed line points (positions of `visited`)
    path: Vec<Vec2>,
    animation: Option<LinkAnimation>,
    /// Re-init scheduled for the tick after a round-ready notification
    pending_init: bool,
    /// Seconds left before the post-clear reset, when one is scheduled
    complete_pause_left: Option<f32>,
    link_anim_secs: f32,
    complete_pause_secs: f32,
}

impl SelectionEngine {
    pub fn new(link_anim_secs: f32, complete_pause_secs: f32) -> Self {
        Self {
            current: None,
            visited: Vec::new(),
            path: Vec::new(),
            animation: None,
            pending_init: false,
            complete_pause_left: None,
            link_anim_secs,
            complete_pause_secs,
        }
    }

    /// Defer (re)initialization to the next tick. Selection input is ignored
    /// until the init runs; stale ids from the discarded round can't act.
    pub fn await_round(&mut self) {
        self.current = None;
        self.animation = None;
        self.pending_init = true;
    }

    pub fn pending_init(&self) -> bool {
        self.pending_init
    }

    /// Initialize from the published round: the start target becomes the
    /// sole visited entry and path point.
    ///
    /// An absent start is a logged no-op, not a crash. An empty round counts
    /// as already complete so the field regenerates instead of stalling.
    pub fn init(&mut self, field: &TargetField) {
        self.visited.clear();
        self.path.clear();
        self.current = None;
        self.animation = None;
        self.pending_init = false;
        self.complete_pause_left = None;

        let Some(start_id) = field.start_id() else {
            if field.is_empty() {
                log::warn!("select: empty round, treating as complete");
                self.complete_pause_left = Some(self.complete_pause_secs);
            } else {
                log::error!("select: round has no start target");
            }
            return;
        };
        let Some(start) = field.get(start_id) else {
            log::error!("select: start target {start_id} missing from round");
            return;
        };

        self.current = Some(start_id);
        self.visited.push(start_id);
        self.path.push(start.pos);
        log::debug!("select: initialized at start {start_id}");
    }

    /// Player selected a target: classify it against the nearest-unvisited
    /// rule and start the link animation carrying the verdict.
    ///
    /// Ignored while a segment is in flight, before initialization, during
    /// the post-clear pause, for unknown ids, and for the current target.
    pub fn on_select(&mut self, field: &TargetField, id: u32) {
        if self.animation.is_some() || self.pending_init || self.complete_pause_left.is_some() {
            return;
        }
        // Transient invalid state: heal by re-running init.
        if self.current.is_some() && self.path.is_empty() {
            log::warn!("select: path buffer empty, re-initializing");
            self.init(field);
        }
        let Some(current_id) = self.current else {
            return;
        };
        if id == current_id {
            return;
        }
        let Some(target) = field.get(id) else {
            log::debug!("select: ignoring unknown target {id}");
            return;
        };
        let Some(current) = field.get(current_id) else {
            log::error!("select: current target {current_id} not in round");
            return;
        };

        let verdict = if Some(id) == self.correct_next(field, current.pos) {
            Attempt::Hit
        } else {
            Attempt::Miss
        };

        self.animation = Some(LinkAnimation {
            target: id,
            from: self.path.last().copied().unwrap_or(current.pos),
            to: target.pos,
            progress: 0.0,
            verdict,
        });
    }

    /// The correct next selection: nearest unvisited target from `from` by
    /// Euclidean distance. Ties resolve to the first candidate in storage
    /// order.
    pub fn correct_next(&self, field: &TargetField, from: Vec2) -> Option<u32> {
        let mut best: Option<(u32, f32)> = None;
        for t in field.targets() {
            if self.visited.contains(&t.id) {
                continue;
            }
            let d = from.distance_squared(t.pos);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((t.id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Correct next selection from the current target, if initialized
    pub fn next_from_current(&self, field: &TargetField) -> Option<u32> {
        let current = field.get(self.current?)?;
        self.correct_next(field, current.pos)
    }

    /// Advance the in-flight segment; returns the link once progress
    /// reaches 1.
    pub fn advance_animation(&mut self, dt: f32) -> Option<CompletedLink> {
        let anim = self.animation.as_mut()?;
        anim.progress += dt / self.link_anim_secs;
        if anim.progress < 1.0 {
            return None;
        }
        let done = CompletedLink {
            target: anim.target,
            end: anim.to,
            verdict: anim.verdict,
        };
        self.animation = None;
        Some(done)
    }

    /// Commit a completed hit: extend the path, mark the target visited,
    /// advance the current position. Returns true when the round is now
    /// fully connected.
    pub fn commit_hit(&mut self, field: &mut TargetField, link: &CompletedLink) -> bool {
        field.set_state(link.target, TargetState::Visited);
        self.visited.push(link.target);
        self.path.push(link.end);
        self.current = Some(link.target);
        self.visited.len() == field.len()
    }

    /// Commit a completed miss: the wrong segment stays drawn until the
    /// round is rebuilt.
    pub fn commit_miss(&mut self, field: &mut TargetField, link: &CompletedLink) {
        field.set_state(link.target, TargetState::Miss);
        self.path.push(link.end);
    }

    /// Arm the post-clear pause before the round reset
    pub fn schedule_reset(&mut self) {
        self.complete_pause_left = Some(self.complete_pause_secs);
    }

    /// Count down the post-clear pause; returns true once the reset is due
    pub fn reset_due(&mut self, dt: f32) -> bool {
        match self.complete_pause_left.as_mut() {
            Some(left) => {
                *left -= dt;
                if *left <= 0.0 {
                    self.complete_pause_left = None;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&LinkAnimation> {
        self.animation.as_ref()
    }

    pub fn current(&self) -> Option<u32> {
        self.current
    }

    /// Connected targets in selection order
    pub fn visited(&self) -> &[u32] {
        &self.visited
    }

    /// Line points to draw: committed path plus the animated tip
    pub fn path_points(&self) -> Vec<Vec2> {
        let mut pts = self.path.clone();
        if let Some(anim) = &self.animation {
            pts.push(anim.tip());
        }
        pts
    }
}
