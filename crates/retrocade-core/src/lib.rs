pub mod clock;
pub mod collision;
pub mod command;
pub mod cooldown;
pub mod entity;
pub mod formation;
pub mod game_trait;
pub mod grid;
pub mod kinetic;
pub mod leaderboard;
pub mod rect;
pub mod replay;
pub mod rng;
pub mod session;
pub mod spawn;
pub mod state;
pub mod wander;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use serde::{Deserialize, Serialize};

    use crate::arcade_game_boilerplate;
    use crate::command::Command;
    use crate::entity::Sprite;
    use crate::game_trait::{ArcadeGame, GameEvent, GameMetadata};
    use crate::state::GameState;

    /// Run `n` update ticks with a fixed command, returning all events.
    pub fn run_ticks(
        game: &mut dyn ArcadeGame,
        n: usize,
        dt: f32,
        command: Command,
    ) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt, command));
        }
        all_events
    }

    /// Assert that the game's snapshot differs from `before`.
    pub fn assert_snapshot_changed(game: &dyn ArcadeGame, before: &[u8]) {
        let after = game.snapshot();
        assert_ne!(
            before,
            &after[..],
            "Game state should have changed after operation"
        );
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CounterState {
        elapsed: f32,
        game: GameState,
    }

    /// Minimal deterministic game for exercising sessions and traces: it
    /// accumulates time and ends on the first delivered `Shoot`.
    pub struct CounterGame {
        state: CounterState,
        paused: bool,
    }

    impl CounterGame {
        pub fn new() -> Self {
            Self {
                state: CounterState {
                    elapsed: 0.0,
                    game: GameState::new(1),
                },
                paused: false,
            }
        }

        pub fn elapsed(&self) -> f32 {
            self.state.elapsed
        }
    }

    impl Default for CounterGame {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ArcadeGame for CounterGame {
        fn metadata(&self) -> GameMetadata {
            GameMetadata {
                name: "Counter".to_string(),
                description: "Test stub that counts time".to_string(),
            }
        }

        fn update(&mut self, dt: f32, command: Command) -> Vec<GameEvent> {
            if self.paused || !self.state.game.tick_phase(dt) {
                return Vec::new();
            }
            self.state.elapsed += dt;
            if command == Command::Shoot {
                self.state.game.lose_life(0.0);
                return vec![GameEvent::GameOver {
                    score: self.state.game.score,
                }];
            }
            Vec::new()
        }

        fn sprites(&self) -> Vec<Sprite> {
            Vec::new()
        }

        arcade_game_boilerplate!(state_type: CounterState);
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // These functions form a generic test suite that every ArcadeGame
    // implementation must pass. Game crates call them from their own
    // #[cfg(test)] modules with a concrete, deterministically seeded game.

    /// A freshly constructed game must serialize to non-empty bytes.
    pub fn contract_snapshot_nonempty(game: &dyn ArcadeGame) {
        let state = game.snapshot();
        assert!(!state.is_empty(), "snapshot() must return non-empty bytes");
    }

    /// update() with dt>0 must advance observable state.
    pub fn contract_update_advances_state(game: &mut dyn ArcadeGame, command: Command) {
        let before = game.snapshot();
        game.update(0.1, command);
        let after = game.snapshot();
        assert_ne!(before, after, "update(dt>0) must advance game state");
    }

    /// snapshot → restore roundtrip: state must be stable after one pass.
    pub fn contract_snapshot_roundtrip_stable(game: &mut dyn ArcadeGame) {
        let state_a = game.snapshot();
        game.restore(&state_a);
        let state_b = game.snapshot();
        game.restore(&state_b);
        let state_c = game.snapshot();
        assert_eq!(
            state_b, state_c,
            "State must be stable after snapshot→restore roundtrip"
        );
    }

    /// pause() must freeze the simulation, resume() must unfreeze it.
    pub fn contract_pause_stops_updates(game: &mut dyn ArcadeGame, command: Command) {
        game.pause();
        let before = game.snapshot();
        game.update(0.1, command);
        let during_pause = game.snapshot();
        assert_eq!(before, during_pause, "State must not change while paused");

        game.resume();
        game.update(0.1, command);
        let after_resume = game.snapshot();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }

    /// restore() with garbage bytes must leave the current state intact.
    pub fn contract_restore_rejects_garbage(game: &mut dyn ArcadeGame) {
        let before = game.snapshot();
        game.restore(&[0xFF, 0xFE, 0x00, 0x01, 0xAB, 0xCD]);
        let after = game.snapshot();
        assert_eq!(before, after, "Malformed restore bytes must be ignored");
    }

    /// Every game must expose non-empty metadata and draw-ready sprites.
    pub fn contract_metadata_and_sprites(game: &dyn ArcadeGame) {
        let metadata = game.metadata();
        assert!(!metadata.name.is_empty(), "Game name must not be empty");
        for sprite in game.sprites() {
            assert!(
                sprite.rect.w > 0.0 && sprite.rect.h > 0.0,
                "Sprite boxes must have positive extent"
            );
        }
    }
}
