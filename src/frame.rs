//! Fixed-step frame clock
//!
//! Turns variable frame deltas into whole `SIM_DT` simulation steps. Leftover
//! time carries over to the next frame.

use crate::consts::*;
use crate::sim::{Simulation, TickInput};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconsumed frame time (always below `SIM_DT` unless substeps ran out)
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Feed one frame's delta; returns the number of ticks run
    pub fn step(&mut self, sim: &mut Simulation, frame_dt: f32, input: &TickInput) -> u32 {
        let frame_dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let scaled = SIM_DT * sim.time_scale();
            sim.tick(input, scaled, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Drop any pending time (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
