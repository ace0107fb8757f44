//! Frame clock settings
//!
//! How much simulated time one timer tick of the render loop covers:
//! `substeps` fixed steps of `dt` seconds each, `tick_hz` ticks per second

use crate::error::{SimError, SimResult};

pub const DEFAULT_DT: f64 = 60.0;
pub const DEFAULT_SUBSTEPS: usize = 200;
pub const DEFAULT_TICK_HZ: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct Engine {
    pub dt: f64, // seconds per substep
    pub substeps: usize, // substeps per rendered frame
    pub tick_hz: f64, // timer ticks per real second
}

impl Engine {
    pub fn new(dt: f64, substeps: usize, tick_hz: f64) -> SimResult<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidTimestep(dt));
        }
        if substeps == 0 {
            return Err(SimError::InvalidSubsteps(substeps));
        }
        if !(tick_hz.is_finite() && tick_hz > 0.0) {
            return Err(SimError::InvalidTickRate(tick_hz));
        }
        Ok(Self { dt, substeps, tick_hz })
    }

    /// Simulated seconds that one tick advances
    pub fn simulated_seconds_per_tick(&self) -> f64 {
        self.dt * self.substeps as f64
    }

    /// Real time between ticks
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.tick_hz)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            substeps: DEFAULT_SUBSTEPS,
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}
