//! Shape generation for 2D primitives
//!
//! Everything is built in playfield coordinates (origin top-left, y down)
//! and mapped to clip space by [`Viewport`] just before upload.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::{EntityKind, Session};

/// Fill color for a body
pub fn entity_color(kind: EntityKind) -> [f32; 4] {
    match kind {
        EntityKind::Player => colors::PLAYER,
        EntityKind::Obstacle => colors::OBSTACLE,
        EntityKind::Ground => colors::GROUND,
    }
}

/// Append a filled axis-aligned rectangle (two triangles)
pub fn push_rect(vertices: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    let max = min + size;
    vertices.push(Vertex::new(min.x, min.y, color));
    vertices.push(Vertex::new(max.x, min.y, color));
    vertices.push(Vertex::new(min.x, max.y, color));

    vertices.push(Vertex::new(min.x, max.y, color));
    vertices.push(Vertex::new(max.x, min.y, color));
    vertices.push(Vertex::new(max.x, max.y, color));
}

/// Generate vertices for a filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_rect(&mut vertices, min, size, color);
    vertices
}

/// Rectangles for every body in the session, back to front
pub fn session_vertices(session: &Session) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((session.obstacle_count() + 2) * 6);
    for (kind, body) in session.entities() {
        push_rect(&mut vertices, body.pos, body.size(), entity_color(kind));
    }
    vertices
}

/// Maps the playfield into the surface, letterboxed to keep its aspect ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub playfield: Vec2,
    pub surface: Vec2,
}

impl Viewport {
    pub fn new(playfield: Vec2, surface_width: u32, surface_height: u32) -> Self {
        Self {
            playfield,
            surface: Vec2::new(surface_width.max(1) as f32, surface_height.max(1) as f32),
        }
    }

    /// Fraction of each clip-space axis the playfield covers
    fn extent(&self) -> Vec2 {
        let scale = (self.surface.x / self.playfield.x).min(self.surface.y / self.playfield.y);
        self.playfield * scale / self.surface
    }

    /// Playfield point to normalized device coordinates
    pub fn to_ndc(&self, p: Vec2) -> Vec2 {
        let unit = p / self.playfield;
        let extent = self.extent();
        Vec2::new((unit.x * 2.0 - 1.0) * extent.x, (1.0 - unit.y * 2.0) * extent.y)
    }

    pub fn map_vertices(&self, vertices: &[Vertex]) -> Vec<Vertex> {
        vertices
            .iter()
            .map(|v| {
                let ndc = self.to_ndc(Vec2::from(v.position));
                Vertex::new(ndc.x, ndc.y, v.color)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), colors::PLAYER);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
        assert!(verts.iter().all(|v| v.color == colors::PLAYER));
    }

    #[test]
    fn test_session_vertices_per_body() {
        let mut session = Session::new(Tuning::default(), 3);
        assert_eq!(session_vertices(&session).len(), 12);
        session.spawn_obstacle();
        session.spawn_obstacle();
        let verts = session_vertices(&session);
        assert_eq!(verts.len(), 24);
        // Ground first, player second, obstacles last
        assert_eq!(verts[0].color, colors::GROUND);
        assert_eq!(verts[6].color, colors::PLAYER);
        assert_eq!(verts[23].color, colors::OBSTACLE);
    }

    #[test]
    fn test_viewport_exact_fit() {
        let vp = Viewport::new(Vec2::new(800.0, 400.0), 800, 400);
        assert_close(vp.to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_close(vp.to_ndc(Vec2::new(800.0, 400.0)), Vec2::new(1.0, -1.0));
        assert_close(vp.to_ndc(Vec2::new(400.0, 200.0)), Vec2::ZERO);
    }

    #[test]
    fn test_viewport_letterboxes_tall_surface() {
        // Surface is square: playfield fills the width, half the height
        let vp = Viewport::new(Vec2::new(800.0, 400.0), 800, 800);
        assert_close(vp.to_ndc(Vec2::ZERO), Vec2::new(-1.0, 0.5));
        assert_close(vp.to_ndc(Vec2::new(800.0, 400.0)), Vec2::new(1.0, -0.5));
    }

    #[test]
    fn test_viewport_pillarboxes_wide_surface() {
        let vp = Viewport::new(Vec2::new(800.0, 400.0), 1600, 400);
        assert_close(vp.to_ndc(Vec2::ZERO), Vec2::new(-0.5, 1.0));
    }

    #[test]
    fn test_viewport_zero_surface_does_not_divide_by_zero() {
        let vp = Viewport::new(Vec2::new(800.0, 400.0), 0, 0);
        let p = vp.to_ndc(Vec2::new(100.0, 100.0));
        assert!(p.is_finite());
    }
}
