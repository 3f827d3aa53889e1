use serde::{Deserialize, Serialize};

use crate::clock::FrameClock;
use crate::command::{Command, CommandDebouncer};
use crate::game_trait::{ArcadeGame, GameEvent};
use crate::state::Phase;

/// What the host should do once a session has ended. Serializes to the
/// lowercase vocabulary the menu collaborator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionResult {
    /// Start another round of the same game.
    Continue,
    /// Back to the selection screen.
    Menu,
    /// Terminate.
    Quit,
}

/// Final score and level of a finished session, for menus and leaderboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub score: u32,
    pub level: u32,
}

/// One game run: a game plus its private frame clock and debounce window.
///
/// The host calls [`Session::frame`] once per rendered frame with the
/// measured frame duration and the raw classifier output; the session clamps
/// the time step, debounces the command, and advances the game.
pub struct Session<G: ArcadeGame> {
    game: G,
    clock: FrameClock,
    debouncer: CommandDebouncer,
}

impl<G: ArcadeGame> Session<G> {
    pub fn new(game: G) -> Self {
        Self {
            game,
            clock: FrameClock::new(),
            debouncer: CommandDebouncer::new(),
        }
    }

    /// Run one frame of the input-to-simulation pipeline. `raw` is this
    /// frame's classifier output, `Command::None` when nothing was seen.
    pub fn frame(&mut self, frame_seconds: f32, raw: Command) -> Vec<GameEvent> {
        let dt = self.clock.clamp(frame_seconds);
        let command = self.debouncer.push(raw);
        let events = self.game.update(dt, command);
        for event in &events {
            if let GameEvent::GameOver { score } = *event {
                tracing::debug!(score, "session ended");
            }
        }
        events
    }

    pub fn is_over(&self) -> bool {
        self.game.phase() == Phase::GameOver
    }

    /// The final outcome once the game has ended.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        if !self.is_over() {
            return None;
        }
        let hud = self.game.hud();
        Some(SessionOutcome {
            score: hud.score,
            level: hud.level,
        })
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }
}
