//! Frame clock
//!
//! Turns the timestamps handed to frame callbacks into bounded deltas.

use crate::consts::NOMINAL_FRAME_MS;

/// Tracks the previous frame timestamp for one run
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    max_delta_ms: f32,
}

impl FrameClock {
    pub fn new(max_delta_ms: f32) -> Self {
        Self {
            last_time: None,
            max_delta_ms,
        }
    }

    /// Milliseconds since the previous call, clamped to `[0, max_delta_ms]`.
    ///
    /// The first call has no previous timestamp and reports a nominal frame
    /// interval instead. Timestamps going backwards (or NaN) report zero.
    pub fn delta_ms(&mut self, now_ms: f64) -> f32 {
        let previous = self.last_time.replace(now_ms);
        let Some(previous) = previous else {
            return NOMINAL_FRAME_MS.min(self.max_delta_ms);
        };

        let delta = (now_ms - previous) as f32;
        if !delta.is_finite() || delta <= 0.0 {
            return 0.0;
        }
        delta.min(self.max_delta_ms)
    }

    /// Whether a frame has been seen yet
    pub fn started(&self) -> bool {
        self.last_time.is_some()
    }
}
