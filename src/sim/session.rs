//! A single run: player, obstacles, score, and the Playing/Ended state
//!
//! The session owns every entity. Obstacles live in an id-keyed arena so
//! removal is by handle and iteration order is spawn order.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::{Body, EntityKind};
use super::obstacle::{Obstacle, ObstacleId};
use super::player::Player;
use super::spawn::SpawnTimer;
use crate::consts::GROUND_THICKNESS;
use crate::tuning::Tuning;

/// Text shown over the frozen playfield after a collision
pub const GAME_OVER_TEXT: &str = "Game Over!\nPress R to restart";

/// Whether the run is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    Ended,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) tuning: Tuning,
    pub(crate) player: Player,
    pub(crate) obstacles: BTreeMap<ObstacleId, Obstacle>,
    pub(crate) phase: SessionPhase,
    /// Ticks survived this run
    pub(crate) score: u64,
    /// Simulation ticks since the last reset
    pub(crate) ticks: u64,
    pub(crate) spawn: SpawnTimer,
    pub(crate) rng: Pcg32,
    /// Obstacle that ended the run
    pub(crate) collided_with: Option<ObstacleId>,
    /// Static ground strip (render only)
    ground: Body,
    seed: u64,
    next_id: u32,
}

impl Session {
    /// New run; the same seed and inputs replay the same game
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn = SpawnTimer::new(&mut rng, &tuning);
        let ground = Body::new(
            Vec2::new(0.0, tuning.ground_level),
            Vec2::new(tuning.playfield_width, GROUND_THICKNESS),
        );

        Self {
            player: Player::new(&tuning),
            obstacles: BTreeMap::new(),
            phase: SessionPhase::Playing,
            score: 0,
            ticks: 0,
            spawn,
            rng,
            collided_with: None,
            ground,
            seed,
            next_id: 1,
            tuning,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ground(&self) -> &Body {
        &self.ground
    }

    /// Active obstacles in spawn order
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.values()
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(&id)
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn.elapsed
    }

    pub fn next_spawn_interval(&self) -> f32 {
        self.spawn.next_interval
    }

    pub fn collided_with(&self) -> Option<ObstacleId> {
        self.collided_with
    }

    /// Every drawable body, back to front
    pub fn entities(&self) -> impl Iterator<Item = (EntityKind, &Body)> {
        std::iter::once((EntityKind::Ground, &self.ground))
            .chain(std::iter::once((EntityKind::Player, &self.player.body)))
            .chain(self.obstacles.values().map(|o| (EntityKind::Obstacle, &o.body)))
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Overlay text, only while ended
    pub fn game_over_text(&self) -> Option<&'static str> {
        self.is_over().then_some(GAME_OVER_TEXT)
    }

    /// Jump command; ignored once the run has ended
    pub fn jump(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.player.jump();
        }
    }

    /// Start over from the initial pose. Accepted in any phase.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.player = Player::new(&self.tuning);
        self.score = 0;
        self.ticks = 0;
        self.collided_with = None;
        self.spawn = SpawnTimer::new(&mut self.rng, &self.tuning);
        self.phase = SessionPhase::Playing;
        log::info!("Run restarted");
    }

    /// Spawn an obstacle at the right edge, resting on the ground
    pub fn spawn_obstacle(&mut self) -> ObstacleId {
        let pos = Vec2::new(self.tuning.playfield_width, self.tuning.obstacle_ground_y());
        self.spawn_obstacle_at(pos)
    }

    /// Spawn an obstacle with its top-left corner at `pos`
    pub fn spawn_obstacle_at(&mut self, pos: Vec2) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;

        let size = Vec2::new(self.tuning.obstacle_width, self.tuning.obstacle_height);
        self.obstacles
            .insert(id, Obstacle::new(id, pos, size, self.tuning.obstacle_speed));
        log::debug!("Spawned obstacle {} at ({}, {})", id, pos.x, pos.y);
        id
    }

    /// Remove an obstacle by handle
    pub fn remove_obstacle(&mut self, id: ObstacleId) -> Option<Obstacle> {
        self.obstacles.remove(&id)
    }

    /// Advance one tick with no commands
    pub fn tick(&mut self, dt: f32) {
        super::tick::tick(self, &super::tick::TickInput::default(), dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_playing() {
        let session = Session::new(Tuning::default(), 1);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.obstacle_count(), 0);
        assert_eq!(session.spawn_timer(), 0.0);
        assert!((1.5..=3.0).contains(&session.next_spawn_interval()));
        assert_eq!(session.game_over_text(), None);
        assert_eq!(session.score_text(), "Score: 0");
    }

    #[test]
    fn test_spawn_obstacle_at_right_edge_on_ground() {
        let mut session = Session::new(Tuning::default(), 1);
        let id = session.spawn_obstacle();
        let obstacle = session.obstacle(id).unwrap();
        assert_eq!(obstacle.body.pos, Vec2::new(800.0, 260.0));
        assert_eq!(obstacle.body.size(), Vec2::new(20.0, 40.0));
        assert_eq!(obstacle.speed(), 7.0);
    }

    #[test]
    fn test_ids_are_stable_and_ordered() {
        let mut session = Session::new(Tuning::default(), 1);
        let a = session.spawn_obstacle();
        let b = session.spawn_obstacle();
        let c = session.spawn_obstacle();
        assert!(a < b && b < c);

        session.remove_obstacle(b);
        let ids: Vec<_> = session.obstacles().map(|o| o.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(session.obstacle(b).is_none());
    }

    #[test]
    fn test_entities_in_draw_order() {
        let mut session = Session::new(Tuning::default(), 1);
        session.spawn_obstacle();
        let kinds: Vec<_> = session.entities().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![EntityKind::Ground, EntityKind::Player, EntityKind::Obstacle]
        );
    }

    #[test]
    fn test_jump_ignored_when_ended() {
        let mut session = Session::new(Tuning::default(), 1);
        session.phase = SessionPhase::Ended;
        session.jump();
        assert!(!session.player().is_airborne());
    }

    #[test]
    fn test_reset_while_playing_is_permitted() {
        let mut session = Session::new(Tuning::default(), 1);
        session.spawn_obstacle();
        session.jump();
        session.score = 12;
        session.reset();
        assert_eq!(session.score(), 0);
        assert_eq!(session.obstacle_count(), 0);
        assert!(!session.player().is_airborne());
    }

    #[test]
    fn test_game_over_text_when_ended() {
        let mut session = Session::new(Tuning::default(), 1);
        session.phase = SessionPhase::Ended;
        assert_eq!(session.game_over_text(), Some("Game Over!\nPress R to restart"));
    }
}
