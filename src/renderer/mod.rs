//! WebGPU rendering module
//!
//! Every shape, glyphs included, is a flat-colored triangle list built in
//! playfield coordinates.

pub mod pipeline;
pub mod shapes;
#[cfg(not(target_arch = "wasm32"))]
pub mod text;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{Viewport, session_vertices};
#[cfg(not(target_arch = "wasm32"))]
pub use text::{GlyphCache, Hud};
pub use vertex::Vertex;
