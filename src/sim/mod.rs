//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, axis_overlap};
pub use state::{Obstacle, ObstacleKind, Player, RunEvent, RunPhase, RunState};
pub use tick::{AUTOPILOT_LEAD_TICKS, TickInput, autopilot_wants_jump, scroll_speed, tick};
