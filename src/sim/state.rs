//! Run state and core simulation types
//!
//! A [`RunState`] owns the player, every live obstacle and the RNG. Only
//! `reset`, `request_jump` and [`super::tick`] mutate it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::SIM_DT;
use crate::tuning::{HazardPreset, RunTuning};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    #[default]
    Running,
    /// Hit a hazard; frozen until reset
    Ended,
}

/// Something that happened during a tick, for hosts that play sounds or flash the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEvent {
    Jumped,
    Landed,
    /// Hazard scrolled off and was sent back past the right edge (scores a point)
    Recycled { id: u32 },
    Spawned { id: u32, kind: ObstacleKind },
    /// Scrolled off and dropped without scoring
    Removed { id: u32 },
    Collected { id: u32 },
    Crashed { id: u32 },
}

/// The controllable runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left of the collision box; x never changes during a run
    pub pos: Vec2,
    /// Vertical velocity, pixels/tick (negative is up)
    pub vel_y: f32,
    pub size: Vec2,
    /// Set by a jump, cleared on landing
    pub airborne: bool,
}

impl Player {
    /// Standing on the ground at the tuning's start position
    pub fn at_start(tuning: &RunTuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.ground_level),
            vel_y: 0.0,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            airborne: false,
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        !self.airborne
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ends the run on contact
    Hazard,
    /// Picked up on contact for a point
    Collectible,
}

/// Something scrolling right-to-left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Drawing only
    pub radius: f32,
}

impl Obstacle {
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }

    pub fn is_hazard(&self) -> bool {
        self.kind == ObstacleKind::Hazard
    }

    /// Right edge has passed the left screen boundary
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.pos.x < -self.size.x
    }

    /// Resize a hazard in place, keeping it on the ground line
    pub fn apply_preset(&mut self, preset: &HazardPreset, ground_line: f32) {
        self.size = Vec2::new(preset.width, preset.height);
        self.radius = preset.radius;
        self.pos.y = ground_line - preset.height;
    }
}

/// Complete run state (deterministic for a given seed, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub tuning: RunTuning,
    /// Seed the RNG was last created from
    pub seed: u64,
    pub player: Player,
    /// Live obstacles, ascending by id
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Ticks simulated since reset
    pub time_ticks: u64,
    pub phase: RunPhase,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl RunState {
    /// Create a run ready to play
    pub fn new(tuning: RunTuning, seed: u64) -> Self {
        let player = Player::at_start(&tuning);
        let mut state = Self {
            tuning,
            seed,
            player,
            obstacles: Vec::new(),
            score: 0,
            time_ticks: 0,
            phase: RunPhase::Running,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Start a fresh run. The RNG keeps going, so consecutive runs differ.
    pub fn reset(&mut self) {
        self.player = Player::at_start(&self.tuning);
        self.obstacles.clear();
        self.next_id = 1;
        self.score = 0;
        self.time_ticks = 0;
        self.phase = RunPhase::Running;
        self.seed_obstacles();
        log::info!(
            "Run reset: {} seeded obstacle(s), ground at {}",
            self.obstacles.len(),
            self.tuning.ground_level
        );
    }

    /// Start a fresh run that replays exactly like any other run with this seed
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.reset();
    }

    /// Jump if standing and still running. Returns whether the jump happened.
    pub fn request_jump(&mut self) -> bool {
        if self.phase == RunPhase::Ended || !self.player.is_grounded() {
            return false;
        }
        self.player.vel_y = self.tuning.jump_strength;
        self.player.airborne = true;
        true
    }

    pub fn is_ended(&self) -> bool {
        self.phase == RunPhase::Ended
    }

    /// Scroll speed the next tick will use
    pub fn scroll_speed(&self) -> f32 {
        super::tick::scroll_speed(self.score, &self.tuning)
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    pub fn hazards(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.is_hazard())
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a hazard resting on the ground line
    pub fn push_hazard(&mut self, x: f32, preset: HazardPreset) -> u32 {
        let id = self.next_entity_id();
        let ground_line = self.tuning.ground_line();
        let mut hazard = Obstacle {
            id,
            kind: ObstacleKind::Hazard,
            pos: Vec2::new(x, 0.0),
            size: Vec2::ZERO,
            radius: 0.0,
        };
        hazard.apply_preset(&preset, ground_line);
        self.obstacles.push(hazard);
        id
    }

    /// Add a square collectible with its top edge at `y`
    pub fn push_collectible(&mut self, x: f32, y: f32, size: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Collectible,
            pos: Vec2::new(x, y),
            size: Vec2::splat(size),
            radius: size / 2.0,
        });
        id
    }

    fn seed_obstacles(&mut self) {
        let Some(&preset) = self.tuning.hazard_presets.first() else {
            return;
        };
        let offsets = self.tuning.seed_offsets.clone();
        for offset in offsets {
            self.push_hazard(self.tuning.screen_width + offset, preset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_is_seeded() {
        let state = RunState::new(RunTuning::classic(), 7);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.obstacles.len(), 3);

        let xs: Vec<f32> = state.obstacles.iter().map(|o| o.pos.x).collect();
        assert_eq!(xs, vec![800.0, 1150.0, 1500.0]);
        for hazard in &state.obstacles {
            assert!(hazard.is_hazard());
            assert_eq!(hazard.pos.y, 450.0);
            assert_eq!(hazard.size, Vec2::new(50.0, 50.0));
        }
    }

    #[test]
    fn test_lazy_variant_starts_empty() {
        let state = RunState::new(RunTuning::boulder_runner(), 7);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(100.0, 250.0));
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut state = RunState::new(RunTuning::classic(), 1);
        assert!(state.request_jump());
        assert_eq!(state.player.vel_y, -15.0);
        assert!(!state.player.is_grounded());

        state.player.vel_y = -3.0;
        assert!(!state.request_jump());
        assert_eq!(state.player.vel_y, -3.0);
    }

    #[test]
    fn test_no_jump_when_ended() {
        let mut state = RunState::new(RunTuning::classic(), 1);
        state.phase = RunPhase::Ended;
        assert!(!state.request_jump());
        assert_eq!(state.player.vel_y, 0.0);
        assert!(state.player.is_grounded());
    }

    #[test]
    fn test_reset_restores_start() {
        let mut state = RunState::new(RunTuning::classic(), 3);
        let fresh = state.obstacles.clone();

        state.request_jump();
        state.player.pos.y = 300.0;
        state.score = 12;
        state.time_ticks = 999;
        state.phase = RunPhase::Ended;
        state.obstacles.clear();

        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player, Player::at_start(&state.tuning));
        assert_eq!(state.obstacles, fresh);
    }

    #[test]
    fn test_hazard_rests_on_ground_line() {
        let mut state = RunState::new(RunTuning::boulder_runner(), 3);
        let id = state.push_hazard(800.0, HazardPreset::new(40.0, 40.0, 20.0));
        let hazard = state.obstacles.iter().find(|o| o.id == id).unwrap();
        // Boulder tops out at y=270 on a 310 ground line
        assert_eq!(hazard.pos.y, 270.0);
        assert_eq!(hazard.aabb().max.y, state.player.aabb().max.y);
    }

    #[test]
    fn test_offscreen_threshold() {
        let mut state = RunState::new(RunTuning::classic(), 3);
        let hazard = &mut state.obstacles[0];
        hazard.pos.x = -50.0;
        assert!(!hazard.is_offscreen());
        hazard.pos.x = -50.5;
        assert!(hazard.is_offscreen());
    }
}
