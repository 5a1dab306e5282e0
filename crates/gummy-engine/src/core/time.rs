/// Physics tick length. Every per-tick constant in `WorldConfig` is tuned for it.
pub const TICK_DT: f32 = 1.0 / 60.0;

/// Most ticks run for one display frame. A tab returning from the background
/// drops the backlog instead of fast-forwarding the pile.
pub const MAX_CATCH_UP: u32 = 4;

/// Fixed timestep accumulator.
/// Turns variable display frame deltas into a whole number of physics ticks.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.dt * MAX_CATCH_UP as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Forget any partial tick, e.g. after the world was idle.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TICK_DT)
    }
}
