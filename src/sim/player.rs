//! The jumping figure
//!
//! Physics is per tick: velocity changes by `gravity` each tick and position
//! by velocity, independent of wall-clock time. The fixed-step clock keeps the
//! tick rate constant.

use glam::Vec2;

use super::body::Body;
use crate::tuning::Tuning;

/// Vertical state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Grounded,
    Airborne,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub state: PlayerState,
    gravity: f32,
    jump_impulse: f32,
    /// Top-edge y when standing
    ground_y: f32,
}

impl Player {
    /// Player standing at the start position
    pub fn new(tuning: &Tuning) -> Self {
        let ground_y = tuning.player_ground_y();
        Self {
            body: Body::new(
                Vec2::new(tuning.player_x, ground_y),
                Vec2::new(tuning.player_width, tuning.player_height),
            ),
            state: PlayerState::Grounded,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            ground_y,
        }
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.state == PlayerState::Airborne
    }

    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    /// Start a jump. No-op while already airborne (no double jump).
    pub fn jump(&mut self) {
        if self.state == PlayerState::Grounded {
            self.body.vel.y = self.jump_impulse;
            self.state = PlayerState::Airborne;
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        if self.state != PlayerState::Airborne {
            return;
        }

        self.body.vel.y += self.gravity;
        self.body.translate(0.0, self.body.vel.y);

        if self.body.pos.y >= self.ground_y {
            self.body.pos.y = self.ground_y;
            self.body.vel.y = 0.0;
            self.state = PlayerState::Grounded;
        }
    }
}
