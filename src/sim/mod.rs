//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by target id)
//! - No rendering or platform dependencies

pub mod field;
pub mod select;
pub mod session;
pub mod state;
pub mod tick;

pub use field::{Bounds, Target, TargetField, TargetState};
pub use select::{Attempt, CompletedLink, LinkAnimation, SelectionEngine};
pub use session::{SessionClock, SessionPhase};
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick};
