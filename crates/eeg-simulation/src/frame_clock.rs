//! Per-frame simulation clock

use eeg_core::{EegError, EegResult};
use crate::simulation_state::SimulationState;

/// Default unscaled time increment per tick
pub const DEFAULT_TIME_STEP: f64 = 0.05;

/// Advances elapsed time once per host frame. The host decides the cadence.
#[derive(Debug, Clone)]
pub struct FrameClock {
    fixed_time_step: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new(fixed_time_step: f64) -> EegResult<Self> {
        Self::validate_step(fixed_time_step)?;
        Ok(FrameClock { fixed_time_step, frames: 0 })
    }

    fn validate_step(step: f64) -> EegResult<()> {
        if step.is_finite() && step > 0.0 {
            Ok(())
        } else {
            Err(EegError::OutOfRange {
                parameter: "time step",
                value: step as f32,
                constraint: "a finite value > 0",
            })
        }
    }

    /// Advance by the configured step. Returns the elapsed time after the tick.
    pub fn tick(&mut self, state: &mut SimulationState) -> f64 {
        self.advance(state, self.fixed_time_step)
    }

    /// Advance by an explicit step
    pub fn tick_with(&mut self, state: &mut SimulationState, step: f64) -> EegResult<f64> {
        Self::validate_step(step)?;
        Ok(self.advance(state, step))
    }

    fn advance(&mut self, state: &mut SimulationState, step: f64) -> f64 {
        self.frames += 1;
        if state.playing {
            state.elapsed_time += step * f64::from(state.speed_multiplier);
        }
        state.elapsed_time
    }

    pub fn fixed_time_step(&self) -> f64 {
        self.fixed_time_step
    }

    /// Ticks so far, paused ones included
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock { fixed_time_step: DEFAULT_TIME_STEP, frames: 0 }
    }
}
