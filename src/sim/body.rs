//! Shared geometry and kinematics for everything on the playfield
//!
//! Positions are the top-left corner of an axis-aligned box, y grows downward.

use glam::Vec2;

/// What a body represents (drives rendering, not physics)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Obstacle,
    Ground,
}

/// Axis-aligned box with a velocity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    /// Velocity in units per tick
    pub vel: Vec2,
    /// Extents, fixed at construction
    size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap test: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Body) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Shift position; no clamping
    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.pos += Vec2::new(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = body(0.0, 0.0, 10.0, 10.0);
        let b = body(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_edge_touching_is_not_intersection() {
        let a = body(0.0, 0.0, 10.0, 10.0);
        // Shares the vertical edge x = 10
        assert!(!a.intersects(&body(10.0, 0.0, 10.0, 10.0)));
        // Shares the horizontal edge y = 10
        assert!(!a.intersects(&body(0.0, 10.0, 10.0, 10.0)));
        // Corner contact only
        assert!(!a.intersects(&body(10.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_overlap_on_one_axis_only() {
        let a = body(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&body(5.0, 20.0, 10.0, 10.0)));
        assert!(!a.intersects(&body(20.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_containment_intersects() {
        let outer = body(0.0, 0.0, 100.0, 100.0);
        let inner = body(40.0, 40.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_translate_is_unclamped() {
        let mut b = body(5.0, 5.0, 1.0, 1.0);
        b.translate(-20.0, 3.5);
        assert_eq!(b.pos, Vec2::new(-15.0, 8.5));
        assert_eq!(b.size(), Vec2::new(1.0, 1.0));
    }

    fn arb_body() -> impl Strategy<Value = Body> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.5f32..200.0, 0.5f32..200.0)
            .prop_map(|(x, y, w, h)| body(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(a in arb_body(), b in arb_body()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_identical_boxes_intersect(a in arb_body()) {
            let b = a.clone();
            prop_assert!(a.intersects(&b));
        }

        #[test]
        fn prop_separated_boxes_never_intersect(a in arb_body(), gap in 0.0f32..50.0, dy in -300.0f32..300.0) {
            // Place b fully to the right of a, possibly touching
            let b = body(a.max().x + gap, a.pos.y + dy, 10.0, 10.0);
            prop_assert!(!a.intersects(&b));
            prop_assert!(!b.intersects(&a));
        }
    }
}
