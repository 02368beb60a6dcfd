//! Fixed timestep accumulator
//!
//! Decouples simulation ticks from the render cadence: each frame adds its
//! wall-clock delta and gets back the number of whole ticks to run.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
    /// Longest frame delta accepted; never shorter than one step
    max_frame_dt: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
            max_frame_dt: MAX_FRAME_DT.max(step),
        }
    }

    /// Length of one tick in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Unconsumed time carried into the next frame
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Feed one frame's delta; returns how many ticks to run now.
    /// Backlog beyond `max_substeps` is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_step() {
        let mut clock = FixedStep::new(0.25, 8);
        assert_eq!(clock.advance(0.25), 1);
        assert_eq!(clock.pending(), 0.0);
    }

    #[test]
    fn test_carries_remainder() {
        let mut clock = FixedStep::new(0.25, 8);
        assert_eq!(clock.advance(0.125), 0);
        assert_eq!(clock.advance(0.125), 1);
        assert_eq!(clock.advance(0.0625), 0);
        assert_eq!(clock.pending(), 0.0625);
    }

    #[test]
    fn test_frame_dt_clamped() {
        // A 5s stall is treated as MAX_FRAME_DT
        let mut clock = FixedStep::new(0.03125, 100);
        assert_eq!(clock.advance(5.0), 3);
    }

    #[test]
    fn test_long_step_still_reachable() {
        // Step longer than the global frame cap: a stall yields one tick
        let mut clock = FixedStep::new(0.5, 8);
        assert_eq!(clock.advance(0.5), 1);
        assert_eq!(clock.advance(5.0), 1);
        assert_eq!(clock.pending(), 0.0);
    }

    #[test]
    fn test_substep_cap_drops_backlog() {
        let mut clock = FixedStep::new(0.01, 3);
        assert_eq!(clock.advance(0.1), 3);
        assert_eq!(clock.pending(), 0.0);
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.pending(), 0.0);
    }

    #[test]
    fn test_sixty_hz_frames_tick_once() {
        let mut clock = FixedStep::default();
        let mut ticks = 0;
        for _ in 0..600 {
            ticks += clock.advance(SIM_DT);
        }
        // Float drift may hold back at most one tick
        assert!((599..=600).contains(&ticks));
    }
}
