//! Obstacle spawn scheduling
//!
//! The gap between spawns is drawn uniformly from a window that slides down
//! as the score climbs. Both bounds are held at or above a positive floor and
//! the window never inverts, however large the score gets.

use rand::Rng;

use crate::tuning::Tuning;

/// Interval window `(lo, hi)` in seconds for the given score.
/// Always `0 < floor <= lo <= hi`.
pub fn spawn_window(score: u64, tuning: &Tuning) -> (f32, f32) {
    let shrink = (score as f64 / tuning.spawn_score_divisor as f64) as f32;
    let floor = tuning.spawn_interval_floor;

    let lo = (tuning.spawn_interval_min - shrink).max(floor);
    let hi = (tuning.spawn_interval_max - shrink).max(floor).max(lo);
    (lo, hi)
}

/// Draw one interval from the window for `score`
pub fn sample_interval(rng: &mut impl Rng, score: u64, tuning: &Tuning) -> f32 {
    let (lo, hi) = spawn_window(score, tuning);
    rng.random_range(lo..=hi)
}

/// Elapsed-time accumulator deciding when the next obstacle appears
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    /// Seconds since the last spawn
    pub elapsed: f32,
    /// Seconds to wait before the next spawn
    pub next_interval: f32,
}

impl SpawnTimer {
    /// Fresh timer with an interval drawn from the base window
    pub fn new(rng: &mut impl Rng, tuning: &Tuning) -> Self {
        Self {
            elapsed: 0.0,
            next_interval: sample_interval(rng, 0, tuning),
        }
    }

    /// Accumulate `dt`; returns true when a spawn is due.
    /// Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, dt: f32) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.elapsed >= self.next_interval
    }

    /// Restart the wait after a spawn, with an interval for the current score
    pub fn rearm(&mut self, rng: &mut impl Rng, score: u64, tuning: &Tuning) {
        self.elapsed = 0.0;
        self.next_interval = sample_interval(rng, score, tuning);
    }
}
