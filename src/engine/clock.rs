use std::time::Instant;

/// Wall-clock `dt` source for the outer loop.
pub struct FrameClock {
    last: Instant,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last: Instant::now(),
            max_dt,
        }
    }

    /// Seconds since the previous call, at most `max_dt`.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Same as [`FrameClock::tick`] with an explicit "now".
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed.as_secs_f32().min(self.max_dt)
    }

    /// Forget the time spent paused so the next `dt` is small.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}
