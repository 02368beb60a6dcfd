//! Dino Run - a side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump physics, spawning, collisions, score)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Font discovery and other host-specific concerns
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (e.g. after a stall)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;
    /// Y coordinate of the ground line
    pub const GROUND_LEVEL: f32 = 300.0;
    pub const GROUND_THICKNESS: f32 = 2.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.8;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -15.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    /// Leftward distance per tick
    pub const OBSTACLE_SPEED: f32 = 7.0;

    /// Spawn interval window at score 0 (seconds)
    pub const SPAWN_INTERVAL_MIN: f32 = 1.5;
    pub const SPAWN_INTERVAL_MAX: f32 = 3.0;
    /// Score that shortens both interval bounds by one second
    pub const SPAWN_SCORE_DIVISOR: f32 = 500.0;
    /// Lowest either interval bound may shrink to
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.3;
}

/// Wall-clock seed for a new run
#[cfg(not(target_arch = "wasm32"))]
pub fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// Wall-clock seed for a new run
#[cfg(target_arch = "wasm32")]
pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}
