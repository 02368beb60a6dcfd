//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick physics, fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod clock;
pub mod obstacle;
pub mod player;
pub mod session;
pub mod spawn;
pub mod tick;

pub use body::{Body, EntityKind};
pub use clock::FixedStep;
pub use obstacle::{Obstacle, ObstacleId};
pub use player::{Player, PlayerState};
pub use session::{GAME_OVER_TEXT, Session, SessionPhase};
pub use spawn::{SpawnTimer, sample_interval, spawn_window};
pub use tick::{TickInput, tick};
