use serde::{Deserialize, Serialize};

/// Minimum-interval gate on a repeatable action, driven by explicit
/// simulation time so pauses and clamped frames cannot leak real time in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cooldown {
    pub interval: f32,
    last_fire: Option<f32>,
}

impl Cooldown {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            last_fire: None,
        }
    }

    /// Whether the action may fire at simulation time `now`. A cooldown that
    /// has never fired is ready.
    pub fn ready(&self, now: f32) -> bool {
        match self.last_fire {
            None => true,
            Some(last) => now - last > self.interval,
        }
    }

    /// Fire if ready, recording `now` as the last fire time.
    pub fn try_fire(&mut self, now: f32) -> bool {
        if self.ready(now) {
            self.last_fire = Some(now);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.last_fire = None;
    }
}
