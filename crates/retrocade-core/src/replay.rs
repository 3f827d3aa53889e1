use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::game_trait::{ArcadeGame, GameEvent};
use crate::session::Session;

/// One recorded frame of host input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub dt: f32,
    pub command: Command,
}

/// A recorded session: the seed the game was built with plus every frame's
/// duration and raw command. Feeding an identically seeded game the same
/// trace reproduces the session tick for tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandTrace {
    pub seed: u64,
    pub frames: Vec<TraceFrame>,
}

impl CommandTrace {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            frames: Vec::new(),
        }
    }

    pub fn record(&mut self, dt: f32, command: Command) {
        self.frames.push(TraceFrame { dt, command });
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Compact byte encoding for storage next to a snapshot.
    pub fn to_bytes(&self) -> Vec<u8> {
        rmp_serde::to_vec(self).expect("trace serialization must succeed")
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        rmp_serde::from_slice(bytes).ok()
    }
}

/// Drive a session through every recorded frame, returning all events in
/// order.
pub fn replay<G: ArcadeGame>(session: &mut Session<G>, trace: &CommandTrace) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for frame in &trace.frames {
        events.extend(session.frame(frame.dt, frame.command));
    }
    events
}
