//! Boulder Runner - a side-scrolling jump-over-obstacles arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, obstacles, collisions)
//! - `tuning`: Data-driven game balance and variant presets
//! - `session`: Menu / character select / playing / game over flow
//! - `driver`: Fixed timestep frame driver
//! - `view`: Read-only presentation snapshot and text renderer
//! - `highscores`: Top-10 leaderboard

pub mod driver;
pub mod highscores;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod view;

pub use driver::{FixedStepDriver, FrameReport};
pub use highscores::HighScores;
pub use session::{Character, Session, SessionPhase, Theme};
pub use tuning::{RunTuning, TuningError, Variant};

/// Game configuration constants
pub mod consts {
    /// Simulation steps per simulated second
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep; physics constants are per step of this size
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame the driver will account for
    pub const MAX_FRAME_DT: f32 = 0.1;
}
