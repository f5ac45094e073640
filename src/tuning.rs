//! Game balance and world dimensions
//!
//! Everything the simulation treats as a knob lives here. Defaults reproduce
//! the stock game; hosts may override any field from JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How the skater's vertical motion and grounded state are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PhysicsMode {
    /// Per-tick velocity, fixed gravity step, grounded from brick contact
    #[default]
    Kinematic,
    /// Velocity in units/s driven by impulses and continuous gravity,
    /// grounded inferred from vertical speed each step
    RigidBody,
}

impl PhysicsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicsMode::Kinematic => "Kinematic",
            PhysicsMode::RigidBody => "RigidBody",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kinematic" => Some(PhysicsMode::Kinematic),
            "rigidbody" | "rigid-body" | "rigid" => Some(PhysicsMode::RigidBody),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Visible area; bricks are spawned until the track covers its width
    pub viewport: Vec2,
    /// Shared brick size
    pub brick_size: Vec2,
    pub skater_size: Vec2,
    pub gem_size: Vec2,
    /// Height of the ground row the skater starts on
    pub ground_height: f32,

    // === Scrolling ===
    pub starting_scroll_speed: f32,
    /// Added to the scroll speed every running tick
    pub scroll_speed_increment: f32,

    // === Physics ===
    pub physics_mode: PhysicsMode,
    /// Kinematic: velocity lost per tick while airborne
    pub gravity_speed: f32,
    /// Kinematic: upward velocity set by a jump
    pub jump_speed: f32,
    /// Rigid body: downward acceleration (units/s²)
    pub world_gravity: f32,
    /// Rigid body: upward impulse applied by a jump
    pub jump_impulse: f32,
    pub skater_mass: f32,
    /// Rigid body: vertical speeds at or below this count as grounded
    pub grounded_velocity_threshold: f32,
    pub max_rotation_degrees: f32,

    // === Track generation ===
    /// Exclusive upper bound of the per-brick random draw
    pub random_bound: u32,
    /// Draws below this open a gap
    pub gap_chance_max: u32,
    /// Draws from `gap_chance_max` up to this toggle the brick level
    pub level_chance_max: u32,
    pub gap_score_threshold: u64,
    pub level_score_threshold: u64,
    /// Gap width as a multiple of the current scroll speed
    pub gap_width_factor: f32,
    /// Exclusive upper bound of the random gem height above the skater
    pub gem_height_jitter: u32,

    // === Scoring ===
    pub gem_bonus: u64,
    pub score_interval_secs: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(667.0, 375.0),
            brick_size: Vec2::new(64.0, 64.0),
            skater_size: Vec2::new(48.0, 64.0),
            gem_size: Vec2::new(32.0, 32.0),
            ground_height: 64.0,

            starting_scroll_speed: 5.0,
            scroll_speed_increment: 0.01,

            physics_mode: PhysicsMode::Kinematic,
            gravity_speed: 1.5,
            jump_speed: 20.0,
            world_gravity: 900.0,
            jump_impulse: 260.0,
            skater_mass: 0.5,
            grounded_velocity_threshold: 100.0,
            max_rotation_degrees: MAX_ROTATION_DEGREES,

            random_bound: 99,
            gap_chance_max: 2,
            level_chance_max: 4,
            gap_score_threshold: GAP_SCORE_THRESHOLD,
            level_score_threshold: LEVEL_SCORE_THRESHOLD,
            gap_width_factor: 20.0,
            gem_height_jitter: 150,

            gem_bonus: GEM_BONUS,
            score_interval_secs: SCORE_INTERVAL_SECS,
        }
    }
}

impl Tuning {
    /// Default tuning with a different physics strategy
    pub fn with_mode(mode: PhysicsMode) -> Self {
        Self {
            physics_mode: mode,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning ({} physics)", tuning.physics_mode.as_str());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, v: Vec2) -> Result<(), TuningError> {
            if v.x > 0.0 && v.y > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "both dimensions must be positive",
                })
            }
        }

        positive("viewport", self.viewport)?;
        positive("brick_size", self.brick_size)?;
        positive("skater_size", self.skater_size)?;
        positive("gem_size", self.gem_size)?;

        if self.starting_scroll_speed < 0.0 || self.scroll_speed_increment < 0.0 {
            return Err(TuningError::Invalid {
                field: "scroll_speed",
                reason: "scroll speed and its increment must not be negative",
            });
        }
        if self.gravity_speed <= 0.0 || self.world_gravity <= 0.0 {
            return Err(TuningError::Invalid {
                field: "gravity",
                reason: "gravity must be positive",
            });
        }
        if self.jump_speed <= 0.0 || self.jump_impulse <= 0.0 || self.skater_mass <= 0.0 {
            return Err(TuningError::Invalid {
                field: "jump",
                reason: "jump strength and skater mass must be positive",
            });
        }
        if self.random_bound == 0 || self.gap_chance_max > self.level_chance_max {
            return Err(TuningError::Invalid {
                field: "random_bound",
                reason: "draw bound must be non-zero and gap chance must not exceed level chance",
            });
        }
        if self.gap_chance_max > self.random_bound || self.level_chance_max > self.random_bound {
            return Err(TuningError::Invalid {
                field: "level_chance_max",
                reason: "gap and level chances must not exceed the draw bound",
            });
        }
        // A negative gap would move the fill frontier backwards
        if self.gap_width_factor < 0.0 {
            return Err(TuningError::Invalid {
                field: "gap_width_factor",
                reason: "must not be negative",
            });
        }
        if self.score_interval_secs <= 0.0 {
            return Err(TuningError::Invalid {
                field: "score_interval_secs",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Resting height of the skater's center on the ground row
    pub fn skater_start_minimum_y(&self) -> f32 {
        self.skater_size.y / 2.0 + self.ground_height
    }

    /// Where a new run places the skater
    pub fn skater_start(&self) -> Vec2 {
        Vec2::new(self.viewport.x / 4.0, self.skater_start_minimum_y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert!(Tuning::with_mode(PhysicsMode::RigidBody).validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_scroll_speed": 7.5 }"#).unwrap();
        assert_eq!(tuning.starting_scroll_speed, 7.5);
        assert_eq!(tuning.gem_bonus, 50);
        assert_eq!(tuning.physics_mode, PhysicsMode::Kinematic);
    }

    #[test]
    fn test_json_round_trip_keeps_mode() {
        let json = Tuning::with_mode(PhysicsMode::RigidBody).to_json().unwrap();
        let back = Tuning::from_json(&json).unwrap();
        assert_eq!(back.physics_mode, PhysicsMode::RigidBody);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "brick_size": [0.0, 64.0] }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "brick_size", .. }));

        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));

        let err = Tuning::from_json(r#"{ "gap_width_factor": -100.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gap_width_factor", .. }));

        let err = Tuning::from_json(r#"{ "random_bound": 3 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "level_chance_max", .. }));

        // Zero-width gaps still place gems
        assert!(Tuning::from_json(r#"{ "gap_width_factor": 0.0 }"#).is_ok());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(PhysicsMode::from_str("KINEMATIC"), Some(PhysicsMode::Kinematic));
        assert_eq!(PhysicsMode::from_str("rigid-body"), Some(PhysicsMode::RigidBody));
        assert_eq!(PhysicsMode::from_str("verlet"), None);
    }

    #[test]
    fn test_skater_start() {
        let tuning = Tuning::default();
        let start = tuning.skater_start();
        assert_eq!(start.x, 667.0 / 4.0);
        assert_eq!(start.y, 32.0 + 64.0);
    }
}
