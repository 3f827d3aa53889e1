use serde::{Deserialize, Serialize};

/// Largest simulation step handed to a game for one frame, in seconds.
/// Stalls longer than this (window drags, tracking dropouts) are truncated
/// instead of being integrated as one huge step.
pub const MAX_FRAME_DT: f32 = 1.0 / 15.0;

/// Converts measured wall-clock frame durations into bounded simulation
/// steps. Simulation slows down under long stalls rather than tunneling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FrameClock {
    max_dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { max_dt: MAX_FRAME_DT }
    }

    pub fn with_max_dt(max_dt: f32) -> Self {
        Self { max_dt }
    }

    /// Clamp one frame's measured duration. Non-finite or negative readings
    /// sanitize to zero.
    pub fn clamp(&self, frame_seconds: f32) -> f32 {
        if !frame_seconds.is_finite() || frame_seconds < 0.0 {
            return 0.0;
        }
        frame_seconds.min(self.max_dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
