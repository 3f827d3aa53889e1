use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::entity::{PowerUpKind, Sprite};
use crate::state::Phase;

/// Core trait every Retrocade game implements.
///
/// The host owns input capture, rendering, and the menu; a game only
/// advances its simulation against stabilized commands and exposes
/// draw-ready state. All implementations must be usable as trait objects.
pub trait ArcadeGame {
    /// Name and blurb for the selection screen.
    fn metadata(&self) -> GameMetadata;

    /// Advance one tick with this frame's stabilized command.
    fn update(&mut self, dt: f32, command: Command) -> Vec<GameEvent>;

    /// Draw-ready entity state for the external renderer.
    fn sprites(&self) -> Vec<Sprite>;

    /// HUD scalars drawn above the divider line.
    fn hud(&self) -> Hud;

    /// Current lifecycle phase.
    fn phase(&self) -> Phase;

    /// Serialize the full game state to bytes.
    fn snapshot(&self) -> Vec<u8>;

    /// Restore previously snapshotted state. Malformed bytes are ignored
    /// and the current state is kept.
    fn restore(&mut self, bytes: &[u8]);

    /// Freeze the simulation (lost tracking, host overlay).
    fn pause(&mut self);

    /// Resume after a pause.
    fn resume(&mut self);

    /// Nominal simulation rate in ticks per second.
    fn tick_rate(&self) -> f32 {
        60.0
    }
}

/// Name and blurb for the selection screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
}

/// HUD scalars drawn above the divider line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
}

/// Events a game reports out of `update` for the host to react to (sound,
/// leaderboard prompts, menu return).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Scored { points: u32 },
    PowerUpCollected { kind: PowerUpKind },
    LifeLost { lives: u32 },
    LevelCleared { level: u32 },
    GameOver { score: u32 },
}

/// Generates the `ArcadeGame` methods that are identical across all games:
/// `snapshot`, `restore`, `pause`, `resume`, `phase`, and `hud`.
///
/// The implementing struct must have `state: $StateType` and `paused: bool`
/// fields, and `$StateType` must have a `game: GameState` field.
#[macro_export]
macro_rules! arcade_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn snapshot(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
        }

        fn restore(&mut self, bytes: &[u8]) {
            if let Ok(state) = rmp_serde::from_slice::<$StateType>(bytes) {
                self.state = state;
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn phase(&self) -> $crate::state::Phase {
            self.state.game.phase
        }

        fn hud(&self) -> $crate::game_trait::Hud {
            $crate::game_trait::Hud {
                score: self.state.game.score,
                lives: self.state.game.lives,
                level: self.state.game.level,
            }
        }
    };
}
