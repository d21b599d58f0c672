use std::time::Instant;

/// Longest step the simulation takes, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Clamp a raw frame delta into `[0, MAX_FRAME_DELTA]`; NaN becomes zero.
pub fn clamp_frame_delta(seconds: f32) -> f32 {
    if seconds.is_nan() {
        return 0.0;
    }
    seconds.clamp(0.0, MAX_FRAME_DELTA)
}

/// Wall-clock frame timer.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous tick, clamped.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        clamp_frame_delta(dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_capped() {
        assert_eq!(clamp_frame_delta(0.016), 0.016);
        assert_eq!(clamp_frame_delta(2.5), MAX_FRAME_DELTA);
        assert_eq!(clamp_frame_delta(-1.0), 0.0);
        assert_eq!(clamp_frame_delta(f32::NAN), 0.0);
    }

    #[test]
    fn tick_stays_in_range() {
        let mut clock = FrameClock::new();
        for _ in 0..3 {
            let dt = clock.tick();
            assert!((0.0..=MAX_FRAME_DELTA).contains(&dt));
        }
    }
}
