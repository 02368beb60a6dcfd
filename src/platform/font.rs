//! Font discovery
//!
//! The HUD cannot be drawn without a font, so failing to find one is a
//! startup error rather than something to degrade around.

use std::fmt;

/// No usable font
#[derive(Debug, Clone, PartialEq)]
pub enum FontError {
    /// None of the candidate files exist or could be read
    NotFound { tried: Vec<String> },
    /// A file was read but is not a usable font
    Invalid { path: String, reason: String },
    /// The browser reports the family as unavailable
    Unavailable { family: String },
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::NotFound { tried } => {
                write!(f, "no font found (tried {} paths", tried.len())?;
                if !tried.is_empty() {
                    write!(f, ": {}", tried.join(", "))?;
                }
                write!(f, ")")
            }
            FontError::Invalid { path, reason } => {
                write!(f, "font {path} could not be loaded: {reason}")
            }
            FontError::Unavailable { family } => {
                write!(f, "font family \"{family}\" is not available")
            }
        }
    }
}

impl std::error::Error for FontError {}

/// A parsed font and where it came from
#[cfg(not(target_arch = "wasm32"))]
pub struct LoadedFont {
    pub path: String,
    pub font: fontdue::Font,
}

#[cfg(not(target_arch = "wasm32"))]
impl fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedFont").field("path", &self.path).finish()
    }
}

/// Load the first candidate that reads and parses
#[cfg(not(target_arch = "wasm32"))]
pub fn resolve_font(candidates: &[String]) -> Result<LoadedFont, FontError> {
    resolve_font_with(candidates, |path| std::fs::read(path))
}

/// [`resolve_font`] with a caller-supplied file reader
#[cfg(not(target_arch = "wasm32"))]
pub fn resolve_font_with(
    candidates: &[String],
    mut read: impl FnMut(&str) -> std::io::Result<Vec<u8>>,
) -> Result<LoadedFont, FontError> {
    let mut first_invalid = None;

    for path in candidates {
        let bytes = match read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("Font candidate {} unreadable: {}", path, e);
                continue;
            }
        };

        match fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()) {
            Ok(font) => {
                log::info!("Successfully loaded font: {}", path);
                return Ok(LoadedFont {
                    path: path.clone(),
                    font,
                });
            }
            Err(reason) => {
                log::warn!("Font candidate {} rejected: {}", path, reason);
                first_invalid.get_or_insert_with(|| FontError::Invalid {
                    path: path.clone(),
                    reason: reason.to_string(),
                });
            }
        }
    }

    log::error!("Failed to load any font");
    Err(first_invalid.unwrap_or_else(|| FontError::NotFound {
        tried: candidates.to_vec(),
    }))
}

/// Check that the browser can render `family`
#[cfg(target_arch = "wasm32")]
pub fn check_web_font(family: &str, size_px: f32) -> Result<(), FontError> {
    let unavailable = || FontError::Unavailable {
        family: family.to_string(),
    };
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(unavailable)?;

    let query = format!("{}px {}", size_px, family);
    match document.fonts().check(&query) {
        Ok(true) => {
            log::info!("Font available: {}", family);
            Ok(())
        }
        _ => Err(unavailable()),
    }
}
