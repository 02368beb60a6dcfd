//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here, so a run can be
//! re-tuned from JSON without touching code. Missing fields fall back to the
//! defaults in [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Y coordinate of the ground line; bodies rest with their bottom edge on it
    pub ground_level: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Per-tick downward acceleration (must be positive)
    pub gravity: f32,
    /// Vertical velocity set by a jump (must be negative)
    pub jump_impulse: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Per-tick leftward speed
    pub obstacle_speed: f32,

    // === Spawning ===
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    pub spawn_score_divisor: f32,
    pub spawn_interval_floor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_level: GROUND_LEVEL,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_speed: OBSTACLE_SPEED,

            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_max: SPAWN_INTERVAL_MAX,
            spawn_score_divisor: SPAWN_SCORE_DIVISOR,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
        }
    }
}

/// Why a tuning file was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON, or a field has the wrong type
    Parse(serde_json::Error),
    /// Parsed, but a value is outside its allowed range
    Invalid { field: &'static str, value: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "malformed tuning data: {e}"),
            TuningError::Invalid { field, value } => {
                write!(f, "tuning value `{field}` out of range: {value}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate tuning JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("gravity", self.gravity),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_score_divisor", self.spawn_score_divisor),
            ("spawn_interval_floor", self.spawn_interval_floor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid { field, value });
            }
        }

        if !(self.jump_impulse.is_finite() && self.jump_impulse < 0.0) {
            return Err(TuningError::Invalid {
                field: "jump_impulse",
                value: self.jump_impulse,
            });
        }
        if !(self.ground_level.is_finite() && self.ground_level >= self.player_height) {
            return Err(TuningError::Invalid {
                field: "ground_level",
                value: self.ground_level,
            });
        }
        for (field, value) in [
            ("spawn_interval_min", self.spawn_interval_min),
            ("spawn_interval_max", self.spawn_interval_max),
            ("player_x", self.player_x),
        ] {
            if !value.is_finite() {
                return Err(TuningError::Invalid { field, value });
            }
        }

        Ok(())
    }

    /// Y of the player's top edge when standing on the ground
    pub fn player_ground_y(&self) -> f32 {
        self.ground_level - self.player_height
    }

    /// Y of an obstacle's top edge when resting on the ground
    pub fn obstacle_ground_y(&self) -> f32 {
        self.ground_level - self.obstacle_height
    }
}
