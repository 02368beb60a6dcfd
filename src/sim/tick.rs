//! Fixed timestep simulation tick
//!
//! Core game loop step that advances a session deterministically.

use super::session::{Session, SessionPhase};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/up)
    pub jump: bool,
    /// Restart after game over (R)
    pub restart: bool,
}

/// Advance the session by one tick.
///
/// `dt` feeds the spawn timer only; movement is per tick.
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if input.restart && session.phase == SessionPhase::Ended {
        session.reset();
    }
    if input.jump {
        session.jump();
    }

    // Frozen until reset
    if session.phase == SessionPhase::Ended {
        return;
    }

    session.ticks += 1;
    session.player.update();

    if session.spawn.advance(dt) {
        session.spawn_obstacle();
        let score = session.score;
        session.spawn.rearm(&mut session.rng, score, &session.tuning);
        log::debug!(
            "Next spawn in {:.2}s (score {})",
            session.spawn.next_interval,
            score
        );
    }

    let mut offscreen = Vec::new();
    let mut hit = None;
    for obstacle in session.obstacles.values_mut() {
        obstacle.update();

        if session.player.body.intersects(&obstacle.body) {
            hit = Some(obstacle.id);
            break;
        }

        if obstacle.is_offscreen() {
            offscreen.push(obstacle.id);
        }
    }

    for id in offscreen {
        session.remove_obstacle(id);
    }

    if let Some(id) = hit {
        session.collided_with = Some(id);
        session.phase = SessionPhase::Ended;
        log::info!("Hit obstacle {} - final score {}", id, session.score);
        return;
    }

    session.score += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Out of the player's reach (player spans y 240..300)
    const SKY_Y: f32 = 0.0;

    #[test]
    fn test_tick_scores_while_playing() {
        let mut session = Session::new(Tuning::default(), 12345);
        session.tick(0.0);
        session.tick(0.0);
        assert_eq!(session.score(), 2);
        assert_eq!(session.ticks(), 2);
    }

    #[test]
    fn test_collision_ends_run_without_scoring() {
        let mut session = Session::new(Tuning::default(), 12345);
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), SessionPhase::Playing);

        let pos = session.player().body.pos;
        let id = session.spawn_obstacle_at(pos);
        session.tick(0.0);

        assert!(session.is_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.collided_with(), Some(id));

        session.reset();
        assert!(!session.is_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.obstacle_count(), 0);
        assert_eq!(session.player().body.pos, Vec2::new(50.0, 240.0));
        assert_eq!(session.player().body.vel, Vec2::ZERO);
        assert!(!session.player().is_airborne());
        assert_eq!(session.spawn_timer(), 0.0);
        assert!((1.5..=3.0).contains(&session.next_spawn_interval()));
        assert_eq!(session.collided_with(), None);
    }

    #[test]
    fn test_ended_tick_is_noop() {
        let mut session = Session::new(Tuning::default(), 12345);
        let pos = session.player().body.pos;
        session.spawn_obstacle_at(pos);
        session.spawn_obstacle_at(Vec2::new(600.0, SKY_Y));
        session.tick(0.0);
        assert!(session.is_over());

        let frozen: Vec<_> = session.obstacles().map(|o| o.body.pos).collect();
        let ticks = session.ticks();
        for _ in 0..10 {
            session.tick(SIM_DT);
            session.jump();
        }
        let after: Vec<_> = session.obstacles().map(|o| o.body.pos).collect();
        assert_eq!(frozen, after);
        assert_eq!(session.ticks(), ticks);
        assert_eq!(session.score(), 0);
        assert!(!session.player().is_airborne());
    }

    #[test]
    fn test_first_hit_stops_processing() {
        let mut session = Session::new(Tuning::default(), 12345);
        let pos = session.player().body.pos;
        session.spawn_obstacle_at(pos);
        let later = session.spawn_obstacle_at(Vec2::new(500.0, SKY_Y));
        session.tick(0.0);
        assert!(session.is_over());
        // The obstacle after the hit was not advanced
        assert_eq!(session.obstacle(later).unwrap().body.pos.x, 500.0);
    }

    #[test]
    fn test_restart_input_only_when_ended() {
        let mut session = Session::new(Tuning::default(), 12345);
        session.tick(0.0);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut session, &restart, 0.0);
        // Restart is a run-over command; while playing the tick proceeds
        assert_eq!(session.score(), 2);

        let pos = session.player().body.pos;
        session.spawn_obstacle_at(pos);
        session.tick(0.0);
        assert!(session.is_over());

        tick(&mut session, &restart, 0.0);
        assert!(!session.is_over());
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_jump_input() {
        let mut session = Session::new(Tuning::default(), 12345);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut session, &jump, SIM_DT);
        assert!(session.player().is_airborne());
        assert!(session.player().body.pos.y < 240.0);
    }

    #[test]
    fn test_offscreen_culled_after_exactly_118_ticks() {
        let mut session = Session::new(Tuning::default(), 12345);
        let id = session.spawn_obstacle_at(Vec2::new(800.0, SKY_Y));
        for _ in 0..117 {
            session.tick(0.0);
        }
        assert!(session.obstacle(id).is_some());
        session.tick(0.0);
        assert!(session.obstacle(id).is_none());
        assert!(!session.is_over());
    }

    #[test]
    fn test_spawns_on_timer() {
        let mut session = Session::new(Tuning::default(), 12345);
        let interval = session.next_spawn_interval();
        // Just short of the interval
        session.tick(interval * 0.5);
        assert_eq!(session.obstacle_count(), 0);
        session.tick(interval);
        assert_eq!(session.obstacle_count(), 1);
        assert_eq!(session.spawn_timer(), 0.0);

        let obstacle = session.obstacles().next().unwrap();
        // Spawned this tick at x = 800 and advanced once
        assert_eq!(obstacle.body.pos, Vec2::new(793.0, 260.0));
    }

    #[test]
    fn test_jumping_clears_an_obstacle() {
        let mut session = Session::new(Tuning::default(), 12345);
        // Far enough that the jump peaks as it arrives
        session.spawn_obstacle_at(Vec2::new(180.0, 260.0));
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut session, &jump, 0.0);
        for _ in 0..60 {
            session.tick(0.0);
        }
        assert!(!session.is_over(), "collided at tick {}", session.ticks());
    }

    #[test]
    fn test_standing_still_collides() {
        let mut session = Session::new(Tuning::default(), 12345);
        session.spawn_obstacle();
        let mut ticks = 0;
        while !session.is_over() {
            session.tick(0.0);
            ticks += 1;
            assert!(ticks < 200);
        }
        // Obstacle front edge must cross x = 90 (player right edge)
        assert_eq!(session.score(), ticks - 1);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed produce identical runs
        let mut a = Session::new(Tuning::default(), 99999);
        let mut b = Session::new(Tuning::default(), 99999);

        for i in 0..2000u32 {
            let input = TickInput {
                jump: i % 37 == 0,
                restart: true,
            };
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }

        assert_eq!(a.score(), b.score());
        assert_eq!(a.ticks(), b.ticks());
        assert_eq!(a.obstacle_count(), b.obstacle_count());
        assert_eq!(a.next_spawn_interval(), b.next_spawn_interval());
        assert_eq!(a.player().body.pos, b.player().body.pos);
    }

    proptest! {
        #[test]
        fn prop_score_monotonic_while_playing(
            seed in any::<u64>(),
            jumps in proptest::collection::vec(any::<bool>(), 1..400),
        ) {
            let mut session = Session::new(Tuning::default(), seed);
            let mut last = session.score();
            for jump in jumps {
                let was_playing = !session.is_over();
                tick(&mut session, &TickInput { jump, restart: false }, SIM_DT);
                prop_assert!(session.score() >= last);
                if was_playing && !session.is_over() {
                    prop_assert_eq!(session.score(), last + 1);
                }
                last = session.score();
            }
            session.reset();
            prop_assert_eq!(session.score(), 0);
        }

        #[test]
        fn prop_spawn_interval_stays_sane_at_high_score(score in 0u64..u64::MAX / 2, seed in any::<u64>()) {
            let mut session = Session::new(Tuning::default(), seed);
            session.score = score;
            session.spawn.next_interval = 0.0;
            session.tick(SIM_DT);
            let interval = session.next_spawn_interval();
            prop_assert!(interval >= Tuning::default().spawn_interval_floor);
            prop_assert!(interval.is_finite());
        }
    }
}
