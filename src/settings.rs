//! Player preferences
//!
//! Native builds read a JSON file, the browser build uses LocalStorage.
//! A missing or unreadable source is never fatal: defaults apply.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Font files tried in order when `font_path` is unset or unusable
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttf",
    "/System/Library/Fonts/SF-Pro-Text-Regular.otf",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/Library/Fonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Text ===
    /// Font file tried before the candidates
    pub font_path: Option<String>,
    pub font_candidates: Vec<String>,
    /// CSS family checked by the browser build
    pub font_family: String,
    pub score_text_size: f32,
    pub overlay_text_size: f32,

    // === Window ===
    /// Multiplier on the 800x400 playfield for the initial window size
    pub window_scale: f32,
    /// Log frames per second once a second
    pub show_fps: bool,

    // === Run ===
    /// Fixed RNG seed; a wall-clock seed is used when unset
    pub seed: Option<u64>,
    /// JSON file with gameplay overrides
    pub tuning_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_path: None,
            font_candidates: DEFAULT_FONT_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            font_family: "sans-serif".to_string(),
            score_text_size: 24.0,
            overlay_text_size: 32.0,

            window_scale: 1.0,
            show_fps: false,

            seed: None,
            tuning_path: None,
        }
    }
}

impl Settings {
    /// Settings file name looked up in the working directory
    pub const FILE_NAME: &'static str = "dino-run.json";
    /// Environment variable overriding the settings file path
    pub const PATH_ENV: &'static str = "DINO_RUN_SETTINGS";
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dino_run_settings";

    /// Parse settings JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Font files to try, explicit path first
    pub fn font_search_order(&self) -> Vec<String> {
        self.font_path
            .iter()
            .chain(self.font_candidates.iter())
            .cloned()
            .collect()
    }

    /// Window scale, guarded against nonsense values
    pub fn effective_window_scale(&self) -> f32 {
        if self.window_scale.is_finite() && self.window_scale > 0.0 {
            self.window_scale.clamp(0.25, 4.0)
        } else {
            1.0
        }
    }

    /// Load settings from disk (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var(Self::PATH_ENV).unwrap_or_else(|_| Self::FILE_NAME.to_string());
        match Self::read_file(&path) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path, e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// File contents, `None` when there is no such file
    #[cfg(not(target_arch = "wasm32"))]
    fn read_file(path: &str) -> std::io::Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Load the gameplay tuning named by `tuning_path` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_tuning(&self) -> Result<Tuning, Box<dyn std::error::Error + Send + Sync>> {
        match &self.tuning_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let tuning = Tuning::from_json(&json)?;
                log::info!("Loaded tuning from {}", path);
                Ok(tuning)
            }
            None => Ok(Tuning::default()),
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring malformed settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// The browser build has no file access; tuning is always the default
    #[cfg(target_arch = "wasm32")]
    pub fn load_tuning(&self) -> Result<Tuning, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Tuning::default())
    }
}
