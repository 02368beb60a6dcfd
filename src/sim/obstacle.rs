//! Obstacles scrolling in from the right edge

use std::fmt;

use glam::Vec2;

use super::body::Body;

/// Stable handle for an obstacle in the session arena.
/// Allocated in increasing order, so ordering by id is spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObstacleId(pub u32);

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// `body.vel.x` is the per-tick displacement (negative = leftward)
    pub body: Body,
}

impl Obstacle {
    pub fn new(id: ObstacleId, pos: Vec2, size: Vec2, speed: f32) -> Self {
        let mut body = Body::new(pos, size);
        body.vel = Vec2::new(-speed, 0.0);
        Self { id, body }
    }

    /// Leftward distance per tick
    pub fn speed(&self) -> f32 {
        -self.body.vel.x
    }

    /// Move by the body's velocity
    pub fn update(&mut self) {
        self.body.translate(self.body.vel.x, self.body.vel.y);
    }

    /// Past the left boundary by at least its own width
    pub fn is_offscreen(&self) -> bool {
        self.body.pos.x < -self.body.size().x
    }
}
