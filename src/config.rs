//! Run configuration
//!
//! Every tunable constant of a run. Defaults come from [`crate::consts`];
//! a partial JSON document overrides only the fields it names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number")]
    NotFinite { field: &'static str },
    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("`jump_velocity` must point upward (negative), got {0}")]
    JumpNotUpward(f32),
    #[error("ground line {ground_y} lies outside the play field height {field_height}")]
    GroundOutsideField { ground_y: f32, field_height: f32 },
    #[error("spawn edge {spawn_x} is inside the visible field width {field_width}")]
    SpawnInsideField { spawn_x: f32, field_width: f32 },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable constants for a single run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,
    pub ground_y: f32,

    // === Player ===
    /// Fixed lane the player runs in
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Added to vertical velocity every frame
    pub gravity: f32,
    /// Velocity set by a jump (negative is up)
    pub jump_velocity: f32,

    // === Obstacles ===
    pub spawn_x: f32,
    pub spawn_interval_ms: f32,
    pub obstacle_min_height: f32,
    pub obstacle_height_range: f32,
    pub obstacle_min_width: f32,
    pub obstacle_width_range: f32,

    // === Difficulty ===
    pub initial_speed: f32,
    pub speed_step: f32,
    pub speed_interval_ms: f32,

    // === Scoring / timing ===
    pub score_per_ms: f64,
    pub max_frame_delta_ms: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_y: GROUND_Y,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,

            spawn_x: SPAWN_X,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            obstacle_height_range: OBSTACLE_HEIGHT_RANGE,
            obstacle_min_width: OBSTACLE_MIN_WIDTH,
            obstacle_width_range: OBSTACLE_WIDTH_RANGE,

            initial_speed: INITIAL_SPEED,
            speed_step: SPEED_STEP,
            speed_interval_ms: SPEED_INTERVAL_MS,

            score_per_ms: SCORE_PER_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
        }
    }
}

impl RunConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON (handy as a starting point for overrides)
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field for values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ground_y", self.ground_y),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("gravity", self.gravity),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("obstacle_min_height", self.obstacle_min_height),
            ("obstacle_min_width", self.obstacle_min_width),
            ("speed_interval_ms", self.speed_interval_ms),
            ("max_frame_delta_ms", self.max_frame_delta_ms),
        ];
        let non_negative = [
            ("player_x", self.player_x),
            ("obstacle_height_range", self.obstacle_height_range),
            ("obstacle_width_range", self.obstacle_width_range),
            ("initial_speed", self.initial_speed),
            ("speed_step", self.speed_step),
        ];

        for (field, value) in positive {
            check_finite(field, value)?;
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value: value as f64 });
            }
        }
        for (field, value) in non_negative {
            check_finite(field, value)?;
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value: value as f64 });
            }
        }

        // Spawned geometry is drawn from `[min, min + range)`
        check_finite(
            "obstacle_height_range",
            self.obstacle_min_height + self.obstacle_height_range,
        )?;
        check_finite(
            "obstacle_width_range",
            self.obstacle_min_width + self.obstacle_width_range,
        )?;

        check_finite("spawn_x", self.spawn_x)?;
        check_finite("jump_velocity", self.jump_velocity)?;
        if !self.score_per_ms.is_finite() {
            return Err(ConfigError::NotFinite { field: "score_per_ms" });
        }
        if self.score_per_ms < 0.0 {
            return Err(ConfigError::Negative {
                field: "score_per_ms",
                value: self.score_per_ms,
            });
        }

        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::JumpNotUpward(self.jump_velocity));
        }
        if self.ground_y > self.field_height {
            return Err(ConfigError::GroundOutsideField {
                ground_y: self.ground_y,
                field_height: self.field_height,
            });
        }
        if self.spawn_x < self.field_width {
            return Err(ConfigError::SpawnInsideField {
                spawn_x: self.spawn_x,
                field_width: self.field_width,
            });
        }

        Ok(())
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = RunConfig::from_json(r#"{ "gravity": 0.8, "initial_speed": 7.0 }"#)
            .expect("partial config should parse");
        assert_eq!(config.gravity, 0.8);
        assert_eq!(config.initial_speed, 7.0);
        // Untouched fields keep their defaults
        assert_eq!(config.jump_velocity, JUMP_VELOCITY);
        assert_eq!(config.ground_y, GROUND_Y);
    }

    #[test]
    fn test_json_roundtrip_keeps_defaults() {
        let json = RunConfig::default().to_json().unwrap();
        assert_eq!(RunConfig::from_json(&json).unwrap(), RunConfig::default());
    }

    #[test]
    fn test_rejects_downward_jump() {
        let config = RunConfig {
            jump_velocity: 12.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::JumpNotUpward(_))));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = RunConfig {
            spawn_interval_ms: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "spawn_interval_ms", .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let config = RunConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "gravity" })
        ));
    }

    #[test]
    fn test_rejects_negative_range() {
        let config = RunConfig {
            obstacle_width_range: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Negative { .. })));
    }

    #[test]
    fn test_rejects_overflowing_obstacle_range() {
        let config = RunConfig {
            obstacle_min_height: 3.0e38,
            obstacle_height_range: 3.0e38,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "obstacle_height_range" })
        ));
    }

    #[test]
    fn test_rejects_ground_below_field() {
        let config = RunConfig {
            ground_y: 500.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GroundOutsideField { .. })
        ));
    }

    #[test]
    fn test_rejects_spawn_inside_field() {
        let config = RunConfig {
            spawn_x: 400.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnInsideField { .. })
        ));
    }

    #[test]
    fn test_bad_json_is_reported() {
        assert!(matches!(
            RunConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
