pub mod config;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use retrocade_core::arcade_game_boilerplate;
use retrocade_core::command::{Command, Dir};
use retrocade_core::entity::{EntityKind, PelletKind, Sprite};
use retrocade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use retrocade_core::rect::Rect;
use retrocade_core::rng::GameRng;
use retrocade_core::state::GameState;

use crate::config::SnakeConfig;

/// Serializable snake state. The body runs tail-first, head-last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnakeState {
    pub body: VecDeque<(i32, i32)>,
    /// `None` until the first directional command; the snake starts
    /// motionless.
    pub heading: Option<Dir>,
    pub food: (i32, i32),
    pub step_accumulator: f32,
    pub game: GameState,
}

/// The snake: one cell per fixed step, growing on food, dying on walls and
/// on itself. A single life.
pub struct SnakeGame {
    state: SnakeState,
    rng: GameRng,
    paused: bool,
    game_config: SnakeConfig,
}

impl SnakeGame {
    pub fn new() -> Self {
        Self::with_config(SnakeConfig::load())
    }

    pub fn with_config(config: SnakeConfig) -> Self {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Build with an explicit random source; tests and replays seed it.
    pub fn with_rng(config: SnakeConfig, mut rng: GameRng) -> Self {
        let start = (config.cols() / 2, config.rows() / 2);
        let food = random_cell(&mut rng, config.cols(), config.rows());
        let mut body = VecDeque::new();
        body.push_back(start);
        Self {
            state: SnakeState {
                body,
                heading: None,
                food,
                step_accumulator: 0.0,
                game: GameState::new(1),
            },
            rng,
            paused: false,
            game_config: config,
        }
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.game_config
    }

    fn head(&self) -> (i32, i32) {
        self.state.body.back().copied().unwrap_or((0, 0))
    }

    /// One grid step. Returns false when the snake died.
    fn step_once(&mut self, events: &mut Vec<GameEvent>) -> bool {
        let Some(dir) = self.state.heading else {
            return true;
        };
        let head = self.head();
        let (dx, dy) = dir.grid_step();
        let candidate = (head.0 + dx, head.1 + dy);

        let cols = self.game_config.cols();
        let rows = self.game_config.rows();
        let out =
            candidate.0 < 0 || candidate.0 >= cols || candidate.1 < 0 || candidate.1 >= rows;
        let growing = candidate == self.state.food;
        // The tail cell vacates this step, so stepping into it is only a
        // bite when the snake is about to grow.
        let bitten = if growing {
            self.state.body.contains(&candidate)
        } else {
            self.state.body.iter().skip(1).any(|&cell| cell == candidate)
        };
        if out || bitten {
            self.state.game.lose_life(0.0);
            events.push(GameEvent::GameOver { score: self.state.game.score });
            tracing::debug!(score = self.state.game.score, "snake down");
            return false;
        }

        self.state.body.push_back(candidate);
        if growing {
            self.state.game.add_points(1);
            events.push(GameEvent::Scored { points: 1 });
            self.state.food = random_cell(&mut self.rng, cols, rows);
        } else {
            self.state.body.pop_front();
        }
        true
    }
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::new()
    }
}

/// A uniformly random grid cell; the roll ignores the snake, exactly like
/// the food it models.
fn random_cell(rng: &mut GameRng, cols: i32, rows: i32) -> (i32, i32) {
    (rng.range_i32(0, cols), rng.range_i32(0, rows))
}

impl ArcadeGame for SnakeGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Snake".to_string(),
            description: "Grow on food, never touch the walls or yourself".to_string(),
        }
    }

    fn update(&mut self, dt: f32, command: Command) -> Vec<GameEvent> {
        if self.paused || !self.state.game.tick_phase(dt) {
            return Vec::new();
        }

        let mut events = Vec::new();

        // Reversals are ignored; everything else commits immediately.
        if let Some(dir) = command.direction()
            && self.state.heading != Some(dir.opposite())
        {
            self.state.heading = Some(dir);
        }

        self.state.step_accumulator += dt;
        while self.state.step_accumulator >= self.game_config.step_interval {
            self.state.step_accumulator -= self.game_config.step_interval;
            if !self.step_once(&mut events) {
                break;
            }
        }

        events
    }

    fn sprites(&self) -> Vec<Sprite> {
        let size = self.game_config.cell_size;
        let cell_rect = |(col, row): (i32, i32)| {
            Rect::new(col as f32 * size, row as f32 * size, size, size)
        };
        let mut sprites: Vec<Sprite> = self
            .state
            .body
            .iter()
            .map(|&cell| Sprite {
                kind: EntityKind::Actor,
                rect: cell_rect(cell),
            })
            .collect();
        sprites.push(Sprite {
            kind: EntityKind::Pellet(PelletKind::Normal),
            rect: cell_rect(self.state.food),
        });
        sprites
    }

    arcade_game_boilerplate!(state_type: SnakeState);
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrocade_core::leaderboard::Leaderboard;
    use retrocade_core::session::Session;
    use retrocade_core::state::Phase;
    use retrocade_core::test_helpers;

    const STEP: f32 = 1.0 / 15.0;

    fn seeded_game() -> SnakeGame {
        SnakeGame::with_rng(SnakeConfig::default(), GameRng::seeded(42))
    }

    fn place_body(game: &mut SnakeGame, cells: &[(i32, i32)], heading: Dir) {
        game.state.body = cells.iter().copied().collect();
        game.state.heading = Some(heading);
    }

    #[test]
    fn starts_motionless_at_the_field_center() {
        let mut game = seeded_game();
        assert_eq!(game.head(), (96, 54));
        assert_eq!(game.state.body.len(), 1);
        assert!(game.state.heading.is_none());

        for _ in 0..30 {
            game.update(STEP, Command::None);
        }
        assert_eq!(game.head(), (96, 54), "No motion before the first command");
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn first_command_sets_the_snake_moving() {
        let mut game = seeded_game();
        game.state.food = (0, 0);
        game.update(STEP, Command::Right);
        assert_eq!(game.head(), (97, 54));
        assert_eq!(game.state.body.len(), 1, "The tail vacates each step");

        game.update(STEP, Command::None);
        assert_eq!(game.head(), (98, 54), "Motion continues without input");
    }

    #[test]
    fn steps_follow_accumulated_time_not_frames() {
        let mut game = seeded_game();
        game.state.food = (0, 0);
        game.update(1.0 / 30.0, Command::Right);
        assert_eq!(game.head(), (96, 54), "Half an interval is not a step");

        game.update(1.0 / 30.0, Command::None);
        assert_eq!(game.head(), (97, 54));

        // A long stall pays out multiple steps at once.
        game.update(0.21, Command::None);
        assert_eq!(game.head(), (100, 54));
    }

    #[test]
    fn reversal_commands_are_ignored() {
        let mut game = seeded_game();
        game.state.food = (0, 0);
        game.update(STEP, Command::Right);
        assert_eq!(game.head(), (97, 54));

        game.update(STEP, Command::Left);
        assert_eq!(game.head(), (98, 54), "Reversal must not turn the snake");
        assert_eq!(game.state.heading, Some(Dir::Right));

        game.update(STEP, Command::Up);
        assert_eq!(game.head(), (98, 53), "Perpendicular turns commit");
    }

    #[test]
    fn eating_food_grows_and_scores() {
        let mut game = seeded_game();
        game.state.food = (97, 54);

        let events = game.update(STEP, Command::Right);

        assert!(events.contains(&GameEvent::Scored { points: 1 }));
        assert_eq!(game.hud().score, 1);
        assert_eq!(game.state.body.len(), 2);
        let cols = game.game_config.cols();
        let rows = game.game_config.rows();
        let food = game.state.food;
        assert!(food.0 >= 0 && food.0 < cols && food.1 >= 0 && food.1 < rows);
    }

    #[test]
    fn leaving_the_field_ends_the_game() {
        let mut game = seeded_game();
        game.state.food = (0, 0);
        let mut last_events = Vec::new();
        // 95 steps reach the last column; the 96th walks out.
        for _ in 0..96 {
            last_events = game.update(STEP, Command::Right);
        }

        assert_eq!(last_events, vec![GameEvent::GameOver { score: 0 }]);
        assert_eq!(game.phase(), Phase::GameOver);

        let head = game.head();
        game.update(STEP, Command::Left);
        assert_eq!(game.head(), head, "A dead snake stays down");
    }

    #[test]
    fn biting_the_body_ends_the_game() {
        let mut game = seeded_game();
        game.state.food = (0, 0);
        // Hook shape curling back on itself; the head sits at (12, 10).
        place_body(
            &mut game,
            &[(11, 9), (11, 10), (11, 11), (12, 11), (12, 10)],
            Dir::Up,
        );

        let events = game.update(STEP, Command::Left);

        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn the_vacating_tail_cell_is_safe() {
        let mut game = seeded_game();
        game.state.food = (0, 0);
        // A closed square: stepping onto the tail is legal because the tail
        // moves out from underfoot.
        place_body(&mut game, &[(10, 10), (11, 10), (11, 11), (10, 11)], Dir::Left);

        game.update(STEP, Command::Up);

        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.head(), (10, 10));
        assert_eq!(game.state.body.len(), 4);
    }

    #[test]
    fn score_counts_food_eaten() {
        let mut game = seeded_game();
        for expected in 1..=3u32 {
            let (x, y) = game.head();
            game.state.food = (x + 1, y);
            game.update(STEP, Command::Right);
            assert_eq!(game.hud().score, expected);
        }
        assert_eq!(game.state.body.len(), 4);
    }

    #[test]
    fn finished_session_feeds_the_leaderboard() {
        let game = SnakeGame::with_rng(SnakeConfig::default(), GameRng::seeded(9));
        let mut session = Session::new(game);
        // Hold Left until the snake runs out of field.
        for _ in 0..900 {
            session.frame(1.0 / 30.0, Command::Left);
            if session.is_over() {
                break;
            }
        }
        assert!(session.is_over());
        let outcome = session.outcome().expect("finished session has an outcome");

        let mut board = Leaderboard::default();
        assert!(board.qualifies(outcome.score));
        assert!(board.submit("abc", outcome.score));
        assert_eq!(board.entries()[0].name, "ABC");
        assert_eq!(board.entries()[0].score, outcome.score);
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================

    #[test]
    fn contract_suite_passes() {
        let mut game = seeded_game();
        test_helpers::contract_snapshot_nonempty(&game);
        test_helpers::contract_update_advances_state(&mut game, Command::Right);
        test_helpers::contract_snapshot_roundtrip_stable(&mut game);
        test_helpers::contract_pause_stops_updates(&mut game, Command::Right);
        test_helpers::contract_restore_rejects_garbage(&mut game);
        test_helpers::contract_metadata_and_sprites(&game);
    }

    #[test]
    fn sprites_cover_body_and_food() {
        let mut game = seeded_game();
        game.state.food = (97, 54);
        game.update(STEP, Command::Right);

        let sprites = game.sprites();
        assert_eq!(sprites.len(), 3, "Two body cells plus the food");
        assert_eq!(
            sprites.iter().filter(|s| s.kind == EntityKind::Actor).count(),
            2
        );
        let food = sprites.last().unwrap();
        assert_eq!(food.kind, EntityKind::Pellet(PelletKind::Normal));
        assert_eq!(food.rect.w, 10.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_command() -> impl Strategy<Value = Command> {
            prop_oneof![
                Just(Command::None),
                Just(Command::Up),
                Just(Command::Down),
                Just(Command::Left),
                Just(Command::Right),
            ]
        }

        proptest! {
            /// The body length always equals one plus the foods eaten, and a
            /// live head is always inside the field.
            #[test]
            fn length_tracks_score_and_head_stays_in_bounds(
                commands in proptest::collection::vec(any_command(), 1..300),
                seed in 0u64..1000,
            ) {
                let mut game = SnakeGame::with_rng(SnakeConfig::default(), GameRng::seeded(seed));
                for command in commands {
                    game.update(STEP, command);
                }

                prop_assert_eq!(game.state.body.len() as u32, 1 + game.hud().score);
                if game.phase() != Phase::GameOver {
                    let (x, y) = game.head();
                    prop_assert!(x >= 0 && x < 192);
                    prop_assert!(y >= 0 && y < 108);
                }
            }
        }
    }
}
