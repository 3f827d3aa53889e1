pub mod config;
pub mod layout;

use serde::{Deserialize, Serialize};

use retrocade_core::arcade_game_boilerplate;
use retrocade_core::collision;
use retrocade_core::command::Command;
use retrocade_core::entity::{Arena, EntityId, EntityKind, Group, Sprite};
use retrocade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use retrocade_core::grid::{GridGeometry, GridMover};
use retrocade_core::rect::Rect;
use retrocade_core::rng::GameRng;
use retrocade_core::state::{GameState, Phase};
use retrocade_core::wander::Wanderer;

use crate::config::MazeConfig;

/// Serializable maze game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeState {
    pub arena: Arena,
    pub walls: Group,
    pub pellets: Group,
    pub ghosts: Group,
    pub player_id: EntityId,
    pub player: GridMover,
    pub ghost_ai: Vec<(EntityId, Wanderer)>,
    pub game: GameState,
}

/// The grid-maze chase: collect every pellet while dodging roaming ghosts.
pub struct MazeChase {
    state: MazeState,
    geometry: GridGeometry,
    /// Wall boxes never move, so they are cached out of the arena once per
    /// level for the movement queries.
    wall_rects: Vec<Rect>,
    rng: GameRng,
    paused: bool,
    game_config: MazeConfig,
}

impl MazeChase {
    pub fn new() -> Self {
        Self::with_config(MazeConfig::load())
    }

    pub fn with_config(config: MazeConfig) -> Self {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Build with an explicit random source; tests and replays seed it.
    pub fn with_rng(config: MazeConfig, rng: GameRng) -> Self {
        let geometry = layout::geometry(&config);
        let mut arena = Arena::new();
        let player = GridMover::new(
            &geometry,
            layout::PLAYER_SPAWN,
            layout::PLAYER_SPAWN_DIR,
            config.player_speed,
            config.actor_size,
            config.actor_size,
        );
        let player_id = arena.spawn(EntityKind::Actor, player.rect());
        let mut game = Self {
            state: MazeState {
                arena,
                walls: Group::new(),
                pellets: Group::new(),
                ghosts: Group::new(),
                player_id,
                player,
                ghost_ai: Vec::new(),
                game: GameState::new(config.lives),
            },
            geometry,
            wall_rects: Vec::new(),
            rng,
            paused: false,
            game_config: config,
        };
        game.populate_level();
        game
    }

    pub fn state(&self) -> &MazeState {
        &self.state
    }

    pub fn config(&self) -> &MazeConfig {
        &self.game_config
    }

    /// Rebuild walls, pellets, and ghosts for the current level and put the
    /// player back on its spawn cell.
    fn populate_level(&mut self) {
        let state = &mut self.state;
        state.arena.clear();
        state.walls.clear();
        state.pellets.clear();
        state.ghosts.clear();
        state.ghost_ai.clear();

        layout::build(&mut state.arena, &mut state.walls, &mut state.pellets, &self.geometry);

        state.player.reset(&self.geometry, layout::PLAYER_SPAWN, layout::PLAYER_SPAWN_DIR);
        state.player_id = state.arena.spawn(EntityKind::Actor, state.player.rect());

        for &cell in &layout::GHOST_SPAWNS {
            let (cx, cy) = self.geometry.cell_center(cell);
            let rect = Rect::from_center(cx, cy, self.game_config.actor_size, self.game_config.actor_size);
            let id = state.arena.spawn(EntityKind::Ghost, rect);
            state.ghosts.insert(id);
            state
                .ghost_ai
                .push((id, Wanderer::new(self.rng.direction(), self.game_config.ghost_speed)));
        }

        self.wall_rects = self.state.walls.rects(&self.state.arena);
    }

    /// Put the player back on its spawn cell after a ghost contact; the
    /// ghosts and remaining pellets stay where they are.
    fn respawn_player(&mut self) {
        self.state.player.reset(&self.geometry, layout::PLAYER_SPAWN, layout::PLAYER_SPAWN_DIR);
        let rect = self.state.player.rect();
        if let Some(entity) = self.state.arena.get_mut(self.state.player_id) {
            entity.rect = rect;
        }
    }
}

impl Default for MazeChase {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcadeGame for MazeChase {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Maze Chase".to_string(),
            description: "Sweep the maze clean of pellets and stay ahead of the ghosts".to_string(),
        }
    }

    fn update(&mut self, dt: f32, command: Command) -> Vec<GameEvent> {
        if self.paused || !self.state.game.tick_phase(dt) {
            return Vec::new();
        }

        let mut events = Vec::new();

        if let Some(dir) = command.direction() {
            self.state.player.queue(dir);
        }

        // Player movement, then sync its arena box.
        self.state.player.update(&self.geometry, dt, &self.wall_rects);
        let player_rect = self.state.player.rect();
        if let Some(entity) = self.state.arena.get_mut(self.state.player_id) {
            entity.rect = player_rect;
        }

        // Ghost roaming.
        for (id, wanderer) in &mut self.state.ghost_ai {
            if let Some(entity) = self.state.arena.get_mut(*id) {
                wanderer.update(&mut entity.rect, dt, &self.wall_rects, &mut self.rng);
            }
        }

        // Pellet collection.
        let eaten = collision::entity_vs_group(
            &mut self.state.arena,
            self.state.player_id,
            &mut self.state.pellets,
            true,
        );
        for contact in &eaten {
            if let EntityKind::Pellet(kind) = contact.target_kind {
                let points = kind.points();
                self.state.game.add_points(points);
                events.push(GameEvent::Scored { points });
            }
        }

        // Ghost contact.
        let caught = collision::entity_vs_group(
            &mut self.state.arena,
            self.state.player_id,
            &mut self.state.ghosts,
            false,
        );
        if !caught.is_empty() {
            if self.state.game.lose_life(self.game_config.respawn_delay) == Phase::GameOver {
                events.push(GameEvent::GameOver { score: self.state.game.score });
                tracing::debug!(score = self.state.game.score, "maze chase over");
            } else {
                events.push(GameEvent::LifeLost { lives: self.state.game.lives });
                self.respawn_player();
            }
            return events;
        }

        // Maze swept clean: next level, fresh maze, immediately.
        if self.state.pellets.is_empty() {
            self.state.game.advance_level(0.0);
            events.push(GameEvent::LevelCleared { level: self.state.game.level });
            tracing::debug!(level = self.state.game.level, "maze cleared, regenerating");
            self.populate_level();
        }

        events
    }

    fn sprites(&self) -> Vec<Sprite> {
        self.state.arena.sprites()
    }

    arcade_game_boilerplate!(state_type: MazeState);
}
