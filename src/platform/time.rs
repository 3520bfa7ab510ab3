//! Frame timing
//!
//! Turns `requestAnimationFrame` timestamps into simulation deltas.

use crate::consts::{BASELINE_DT, MAX_FRAME_DT};

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame
    ///
    /// The first frame (and the first after [`reset`](Self::reset)) counts as
    /// one baseline frame so a long pause never becomes one huge step.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => BASELINE_DT,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (tab became visible again)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_baseline() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1234.0), BASELINE_DT);
        assert!((clock.delta(1234.0 + 33.0) - 0.033).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_clamped_and_reset_rebases() {
        let mut clock = FrameClock::new();
        clock.delta(0.0);
        assert_eq!(clock.delta(5000.0), MAX_FRAME_DT);
        clock.reset();
        assert_eq!(clock.delta(90_000.0), BASELINE_DT);
        // Clock going backwards never yields a negative step
        assert_eq!(clock.delta(89_000.0), 0.0);
    }
}
