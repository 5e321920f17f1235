//! Data-driven gameplay constants
//!
//! Every number the simulation uses comes from a [`RunTuning`]. Two presets
//! ship with the crate; anything else can be loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Built-in presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Single lane, recycled boulders, score per recycle
    #[default]
    Classic,
    /// Spawned boulders plus coins, score per coin
    BoulderRunner,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::BoulderRunner => "boulder",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "runner" => Some(Variant::Classic),
            "boulder" | "boulder_runner" | "boulder-runner" => Some(Variant::BoulderRunner),
            _ => None,
        }
    }

    pub fn tuning(&self) -> RunTuning {
        match self {
            Variant::Classic => RunTuning::classic(),
            Variant::BoulderRunner => RunTuning::boulder_runner(),
        }
    }
}

/// Size of a hazard (radius is only used for drawing)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardPreset {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

impl HazardPreset {
    pub const fn new(width: f32, height: f32, radius: f32) -> Self {
        Self {
            width,
            height,
            radius,
        }
    }
}

/// What happens to an obstacle once it has scrolled fully off the left edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OffscreenPolicy {
    /// Move hazards back past the right edge by a random offset and score a point
    Recycle { offset_min: f32, offset_max: f32 },
    /// Drop them from the run
    Remove,
}

/// Probabilistic per-tick spawning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// A hazard spawns with probability 1/hazard_chance on an eligible tick
    pub hazard_chance: u32,
    /// Trailing hazard must be this far left of the right edge (random in range)
    pub spacing_min: f32,
    pub spacing_max: f32,
    /// A collectible spawns with probability 1/collectible_chance each tick
    pub collectible_chance: u32,
    pub collectible_size: f32,
    /// Candidate top edges for collectibles (jump-arc heights)
    pub collectible_bands: Vec<f32>,
}

/// All gameplay constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTuning {
    pub screen_width: f32,
    /// Player top edge when standing
    pub ground_level: f32,
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Downward acceleration, pixels/tick²
    pub gravity: f32,
    /// Launch impulse (negative is up), pixels/tick
    pub jump_strength: f32,
    pub base_speed: f32,
    pub speed_increment: f32,
    /// Points per speed step
    pub score_step: u32,
    /// Seeded hazards, placed at screen_width + offset on reset
    pub seed_offsets: Vec<f32>,
    /// First entry is used for seeded hazards
    pub hazard_presets: Vec<HazardPreset>,
    pub offscreen: OffscreenPolicy,
    #[serde(default)]
    pub spawn: Option<SpawnPolicy>,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self::classic()
    }
}

impl RunTuning {
    /// One boulder lane: recycled hazards score on recycle
    pub fn classic() -> Self {
        Self {
            screen_width: 800.0,
            ground_level: 450.0,
            player_x: 100.0,
            player_width: 50.0,
            player_height: 50.0,
            gravity: 0.8,
            jump_strength: -15.0,
            base_speed: 6.0,
            speed_increment: 1.0,
            score_step: 5,
            seed_offsets: vec![0.0, 350.0, 700.0],
            hazard_presets: vec![
                HazardPreset::new(50.0, 50.0, 25.0),
                HazardPreset::new(40.0, 40.0, 20.0),
                HazardPreset::new(60.0, 40.0, 22.0),
            ],
            offscreen: OffscreenPolicy::Recycle {
                offset_min: 200.0,
                offset_max: 500.0,
            },
            spawn: None,
        }
    }

    /// Spawned boulders and coins; coins are the only scoring event
    pub fn boulder_runner() -> Self {
        Self {
            screen_width: 800.0,
            ground_level: 250.0,
            player_x: 100.0,
            player_width: 40.0,
            player_height: 60.0,
            gravity: 1.0,
            jump_strength: -20.0,
            base_speed: 5.0,
            speed_increment: 1.0,
            score_step: 5,
            seed_offsets: Vec::new(),
            hazard_presets: vec![HazardPreset::new(40.0, 40.0, 20.0)],
            offscreen: OffscreenPolicy::Remove,
            spawn: Some(SpawnPolicy {
                hazard_chance: 60,
                spacing_min: 300.0,
                spacing_max: 400.0,
                collectible_chance: 100,
                collectible_size: 30.0,
                collectible_bands: vec![150.0, 165.0, 180.0, 195.0],
            }),
        }
    }

    /// Bottom edge of the player when standing; hazards rest on it
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.ground_level + self.player_height
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: RunTuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.screen_width <= 0.0 {
            return invalid("screen_width", "must be positive");
        }
        if self.player_width <= 0.0 || self.player_height <= 0.0 {
            return invalid("player_width/player_height", "must be positive");
        }
        if self.gravity <= 0.0 {
            return invalid("gravity", "must be positive");
        }
        if self.jump_strength >= 0.0 {
            return invalid("jump_strength", "must be negative (upward)");
        }
        if self.base_speed <= 0.0 || self.speed_increment < 0.0 {
            return invalid("base_speed/speed_increment", "speed must be positive and non-decreasing");
        }
        if self.score_step == 0 {
            return invalid("score_step", "must be at least 1");
        }
        if self.hazard_presets.is_empty() {
            return invalid("hazard_presets", "needs at least one preset");
        }
        if self
            .hazard_presets
            .iter()
            .any(|p| p.width <= 0.0 || p.height <= 0.0)
        {
            return invalid("hazard_presets", "sizes must be positive");
        }
        if let OffscreenPolicy::Recycle {
            offset_min,
            offset_max,
        } = self.offscreen
        {
            if offset_min < 0.0 || offset_min > offset_max {
                return invalid("offscreen", "recycle offsets must satisfy 0 <= min <= max");
            }
        }
        if let Some(spawn) = &self.spawn {
            if spawn.hazard_chance == 0 || spawn.collectible_chance == 0 {
                return invalid("spawn", "chances are 1/n and need n >= 1");
            }
            if spawn.spacing_min > spawn.spacing_max {
                return invalid("spawn", "spacing_min must not exceed spacing_max");
            }
            if spawn.collectible_size <= 0.0 {
                return invalid("spawn", "collectible_size must be positive");
            }
            if spawn.collectible_bands.is_empty() {
                return invalid("spawn", "needs at least one collectible band");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(RunTuning::classic().validate().is_ok());
        assert!(RunTuning::boulder_runner().validate().is_ok());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("Classic"), Some(Variant::Classic));
        assert_eq!(Variant::from_str("boulder"), Some(Variant::BoulderRunner));
        assert_eq!(Variant::from_str("skater"), None);
        assert_eq!(
            Variant::from_str(Variant::BoulderRunner.as_str()),
            Some(Variant::BoulderRunner)
        );
    }

    #[test]
    fn test_json_roundtrip_preset() {
        let json = serde_json::to_string(&RunTuning::boulder_runner()).unwrap();
        let loaded = RunTuning::from_json_str(&json).unwrap();
        assert_eq!(loaded, RunTuning::boulder_runner());
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let mut tuning = RunTuning::classic();
        tuning.gravity = -0.8;
        let json = serde_json::to_string(&tuning).unwrap();
        match RunTuning::from_json_str(&json) {
            Err(TuningError::Invalid { field, .. }) => assert_eq!(field, "gravity"),
            other => panic!("expected invalid gravity, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_inverted_recycle_range() {
        let mut tuning = RunTuning::classic();
        tuning.offscreen = OffscreenPolicy::Recycle {
            offset_min: 500.0,
            offset_max: 200.0,
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid {
                field: "offscreen",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            RunTuning::from_json_str("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RunTuning::from_json_file("/nonexistent/tuning.json"),
            Err(TuningError::Io(_))
        ));
    }

    #[test]
    fn test_ground_line() {
        let tuning = RunTuning::boulder_runner();
        assert_eq!(tuning.ground_line(), 310.0);
    }
}
