//! HUD text as colored quads
//!
//! Printable ASCII is rasterized once per size with fontdue. Each covered
//! glyph pixel becomes a one-unit quad whose alpha is the coverage, so text
//! goes through the same untextured pipeline as every other shape.

use std::collections::HashMap;

use glam::Vec2;

use super::shapes::push_rect;
use super::vertex::{Vertex, colors};
use crate::sim::Session;

/// Top-left corner of the score line
pub const SCORE_ORIGIN: Vec2 = Vec2::new(10.0, 10.0);

/// Line advance as a multiple of the pixel size
pub const LINE_SPACING: f32 = 1.2;

/// One rasterized character
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Horizontal offset from the pen to the bitmap's left edge
    pub xmin: f32,
    /// Baseline to bitmap bottom, positive upward
    pub ymin: f32,
    pub width: usize,
    pub height: usize,
    pub advance: f32,
    /// Row-major coverage, `width * height` bytes
    pub coverage: Vec<u8>,
}

/// Rasterized glyphs for a single pixel size
#[derive(Debug, Clone)]
pub struct GlyphCache {
    glyphs: HashMap<char, Glyph>,
    /// Top of the line box to the baseline
    ascent: f32,
    line_height: f32,
}

impl GlyphCache {
    /// Rasterize ASCII 32-126 at `px`
    pub fn new(font: &fontdue::Font, px: f32) -> Self {
        let mut glyphs = HashMap::with_capacity(95);
        for code in 32u8..=126 {
            let ch = code as char;
            let (metrics, coverage) = font.rasterize(ch, px);
            glyphs.insert(
                ch,
                Glyph {
                    xmin: metrics.xmin as f32,
                    ymin: metrics.ymin as f32,
                    width: metrics.width,
                    height: metrics.height,
                    advance: metrics.advance_width,
                    coverage,
                },
            );
        }

        let ascent = font
            .horizontal_line_metrics(px)
            .map_or(px * 0.8, |lm| lm.ascent);

        Self::from_glyphs(glyphs, ascent, px * LINE_SPACING)
    }

    pub fn from_glyphs(glyphs: HashMap<char, Glyph>, ascent: f32, line_height: f32) -> Self {
        Self {
            glyphs,
            ascent,
            line_height,
        }
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    fn line_width(&self, line: &str) -> f32 {
        line.chars()
            .filter_map(|ch| self.glyphs.get(&ch))
            .map(|g| g.advance)
            .sum()
    }

    /// Width of the widest line and total height
    pub fn measure(&self, text: &str) -> Vec2 {
        let mut width: f32 = 0.0;
        let mut lines = 0;
        for line in text.lines() {
            width = width.max(self.line_width(line));
            lines += 1;
        }
        Vec2::new(width, lines as f32 * self.line_height)
    }

    /// Quads for `text` with its line box's top-left at `origin`
    pub fn layout(&self, text: &str, origin: Vec2, color: [f32; 4]) -> Vec<Vertex> {
        let mut vertices = Vec::new();

        for (row, line) in text.lines().enumerate() {
            let baseline = origin.y + self.ascent + row as f32 * self.line_height;
            let mut pen_x = origin.x;

            for ch in line.chars() {
                // Unsupported characters are skipped
                let Some(glyph) = self.glyphs.get(&ch) else {
                    continue;
                };

                let left = (pen_x + glyph.xmin).round();
                let top = (baseline - glyph.ymin - glyph.height as f32).round();
                for gy in 0..glyph.height {
                    for gx in 0..glyph.width {
                        // Short coverage buffers leave the rest blank
                        let alpha = match glyph.coverage.get(gy * glyph.width + gx) {
                            Some(&a) if a > 0 => a,
                            _ => continue,
                        };
                        let mut c = color;
                        c[3] *= alpha as f32 / 255.0;
                        push_rect(
                            &mut vertices,
                            Vec2::new(left + gx as f32, top + gy as f32),
                            Vec2::ONE,
                            c,
                        );
                    }
                }

                pen_x += glyph.advance;
            }
        }

        vertices
    }

    /// Quads for `text` centered in a `bounds`-sized area at the origin
    pub fn layout_centered(&self, text: &str, bounds: Vec2, color: [f32; 4]) -> Vec<Vertex> {
        let origin = (bounds - self.measure(text)) * 0.5;
        self.layout(text, origin, color)
    }
}

/// Score line and game-over overlay
#[derive(Debug, Clone)]
pub struct Hud {
    score: GlyphCache,
    overlay: GlyphCache,
    playfield: Vec2,
}

impl Hud {
    pub fn new(font: &fontdue::Font, score_px: f32, overlay_px: f32, playfield: Vec2) -> Self {
        Self::from_caches(
            GlyphCache::new(font, score_px),
            GlyphCache::new(font, overlay_px),
            playfield,
        )
    }

    pub fn from_caches(score: GlyphCache, overlay: GlyphCache, playfield: Vec2) -> Self {
        Self {
            score,
            overlay,
            playfield,
        }
    }

    /// Text quads for the current frame, drawn over the scene
    pub fn vertices(&self, session: &Session) -> Vec<Vertex> {
        let mut vertices = self
            .score
            .layout(&session.score_text(), SCORE_ORIGIN, colors::TEXT);
        if let Some(text) = session.game_over_text() {
            vertices.extend(
                self.overlay
                    .layout_centered(text, self.playfield, colors::TEXT),
            );
        }
        vertices
    }
}
