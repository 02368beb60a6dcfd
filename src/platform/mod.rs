//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Font discovery (files on native, the document font set in the browser)

pub mod font;

pub use font::FontError;
#[cfg(not(target_arch = "wasm32"))]
pub use font::{LoadedFont, resolve_font};
