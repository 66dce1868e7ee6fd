//! Variable-step animation clock
//!
//! The first tick only records the start time (dt = 0); every later tick
//! reports the wall-clock time since the previous one.

/// Elapsed/delta tracking from host timestamps in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    /// Wall-clock time of the first tick, `None` until started
    start: Option<f64>,
    /// Seconds since start as of the last tick
    elapsed: f64,
    /// Seconds between the last two ticks
    dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// Record a tick at `now` and return the step in seconds.
    ///
    /// A host clock that steps backwards yields 0 rather than a negative step.
    pub fn advance(&mut self, now: f64) -> f32 {
        let start = *self.start.get_or_insert(now);
        let elapsed = now - start;
        self.dt = (elapsed - self.elapsed).max(0.0) as f32;
        self.elapsed = elapsed.max(self.elapsed);
        self.dt
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Back to the unstarted state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
