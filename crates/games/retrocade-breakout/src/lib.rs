pub mod bricks;
pub mod config;
pub mod powerups;

use serde::{Deserialize, Serialize};

use retrocade_core::arcade_game_boilerplate;
use retrocade_core::collision;
use retrocade_core::command::Command;
use retrocade_core::entity::{Arena, EntityId, EntityKind, Group, PowerUpKind, Sprite};
use retrocade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use retrocade_core::kinetic::{self, KineticBody, ReflectBounds};
use retrocade_core::rect::Rect;
use retrocade_core::rng::GameRng;
use retrocade_core::spawn::DropTable;
use retrocade_core::state::{GameState, Phase};

use crate::config::BreakoutConfig;

/// One ball in flight: its arena entity plus its velocity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallState {
    pub id: EntityId,
    pub body: KineticBody,
}

/// Serializable brick breaker state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakoutState {
    pub arena: Arena,
    pub bricks: Group,
    pub drops: Group,
    pub balls: Vec<BallState>,
    pub paddle_id: EntityId,
    pub game: GameState,
}

/// The brick breaker: keep a ball in flight, clear the wall, catch the
/// power-ups that fall out of it.
pub struct BrickBreaker {
    state: BreakoutState,
    drop_table: DropTable,
    rng: GameRng,
    paused: bool,
    game_config: BreakoutConfig,
}

impl BrickBreaker {
    pub fn new() -> Self {
        Self::with_config(BreakoutConfig::load())
    }

    pub fn with_config(config: BreakoutConfig) -> Self {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Build with an explicit random source; tests and replays seed it.
    pub fn with_rng(config: BreakoutConfig, rng: GameRng) -> Self {
        let mut arena = Arena::new();
        let paddle_rect = Rect::new(
            (config.field_width - config.paddle_width) / 2.0,
            config.field_height - config.paddle_raise,
            config.paddle_width,
            config.paddle_height,
        );
        let paddle_id = arena.spawn(EntityKind::Paddle, paddle_rect);
        let mut game = Self {
            state: BreakoutState {
                arena,
                bricks: Group::new(),
                drops: Group::new(),
                balls: Vec::new(),
                paddle_id,
                game: GameState::new(config.lives),
            },
            drop_table: DropTable::new(config.drop_chance),
            rng,
            paused: false,
            game_config: config,
        };
        bricks::build(&mut game.state.arena, &mut game.state.bricks, &game.game_config);
        game.spawn_centered_ball();
        game
    }

    pub fn state(&self) -> &BreakoutState {
        &self.state
    }

    pub fn config(&self) -> &BreakoutConfig {
        &self.game_config
    }

    fn move_paddle(&mut self, dt: f32, command: Command) {
        let direction = match command {
            Command::Left => -1.0,
            Command::Right => 1.0,
            _ => return,
        };
        if let Some(paddle) = self.state.arena.get_mut(self.state.paddle_id) {
            paddle.rect.x = (paddle.rect.x + direction * self.game_config.paddle_speed * dt)
                .clamp(0.0, self.game_config.field_width - paddle.rect.w);
        }
    }

    /// Serve a fresh ball from the field center; launch direction is a coin
    /// flip, vertical travel always starts upward.
    fn spawn_centered_ball(&mut self) {
        let config = &self.game_config;
        let rect = Rect::from_center(
            config.field_width / 2.0,
            config.field_height / 2.0,
            config.ball_size,
            config.ball_size,
        );
        let vx = if self.rng.coin() { config.ball_speed_x } else { -config.ball_speed_x };
        let body = KineticBody::new(vx, -config.ball_speed_y, config.ball_max_speed);
        let id = self.state.arena.spawn(EntityKind::Ball, rect);
        self.state.balls.push(BallState { id, body });
    }

    /// Serve a ball from the paddle's top center.
    fn spawn_paddle_ball(&mut self) {
        let Some(paddle) = self.state.arena.rect(self.state.paddle_id) else {
            return;
        };
        let config = &self.game_config;
        let rect = Rect::from_center(
            paddle.center_x(),
            paddle.top() - config.ball_size / 2.0,
            config.ball_size,
            config.ball_size,
        );
        let vx = if self.rng.coin() { config.ball_speed_x } else { -config.ball_speed_x };
        let body = KineticBody::new(vx, -config.ball_speed_y, config.ball_max_speed);
        let id = self.state.arena.spawn(EntityKind::Ball, rect);
        self.state.balls.push(BallState { id, body });
    }

    /// Drop balls that flew out the bottom; the bottom edge never reflects.
    fn cull_lost_balls(&mut self) {
        let balls = std::mem::take(&mut self.state.balls);
        for ball in balls {
            match self.state.arena.rect(ball.id) {
                Some(rect) if rect.top() <= self.game_config.field_height => {
                    self.state.balls.push(ball);
                }
                _ => {
                    self.state.arena.despawn(ball.id);
                }
            }
        }
    }

    fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::ExtraBalls => {
                for _ in 0..self.game_config.extra_ball_count {
                    self.spawn_paddle_ball();
                }
            }
            PowerUpKind::MirrorClone => self.mirror_balls(),
            PowerUpKind::WidePaddle => {
                if let Some(paddle) = self.state.arena.get_mut(self.state.paddle_id) {
                    powerups::widen_paddle(&mut paddle.rect, &self.game_config);
                }
            }
            PowerUpKind::FastBalls => {
                for ball in &mut self.state.balls {
                    ball.body.speed_up(self.game_config.speed_up_factor);
                }
            }
        }
    }

    /// Clone every ball in place with its horizontal travel flipped.
    fn mirror_balls(&mut self) {
        let snapshot: Vec<(Rect, KineticBody)> = self
            .state
            .balls
            .iter()
            .filter_map(|ball| self.state.arena.rect(ball.id).map(|rect| (rect, ball.body)))
            .collect();
        for (rect, mut body) in snapshot {
            body.vx = -body.vx;
            let id = self.state.arena.spawn(EntityKind::Ball, rect);
            self.state.balls.push(BallState { id, body });
        }
    }

    /// Next level: fresh wall, fresh single ball, paddle back to its
    /// starting width, leftover drops swept away.
    fn rebuild_level(&mut self) {
        self.state.drops.despawn_all(&mut self.state.arena);
        for ball in std::mem::take(&mut self.state.balls) {
            self.state.arena.despawn(ball.id);
        }
        bricks::build(&mut self.state.arena, &mut self.state.bricks, &self.game_config);
        self.reset_paddle_width();
        self.spawn_centered_ball();
    }

    fn reset_paddle_width(&mut self) {
        let config = &self.game_config;
        if let Some(paddle) = self.state.arena.get_mut(self.state.paddle_id) {
            let center = paddle.rect.center_x();
            paddle.rect.w = config.paddle_width;
            paddle.rect.x = (center - config.paddle_width / 2.0)
                .clamp(0.0, config.field_width - config.paddle_width);
        }
    }
}

impl Default for BrickBreaker {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcadeGame for BrickBreaker {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Brick Breaker".to_string(),
            description: "Clear the wall, catch the drops, keep a ball in flight".to_string(),
        }
    }

    fn update(&mut self, dt: f32, command: Command) -> Vec<GameEvent> {
        if self.paused || !self.state.game.tick_phase(dt) {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.move_paddle(dt, command);

        // Ball flight against the side walls and the HUD divider.
        let bounds = ReflectBounds {
            left: 0.0,
            right: self.game_config.field_width,
            top: self.game_config.hud_line,
        };
        {
            let state = &mut self.state;
            for ball in &mut state.balls {
                if let Some(entity) = state.arena.get_mut(ball.id) {
                    ball.body.integrate(&mut entity.rect, dt, &bounds);
                }
            }
        }
        self.cull_lost_balls();

        // Paddle bounce, unscored.
        if let Some(paddle) = self.state.arena.rect(self.state.paddle_id) {
            let state = &mut self.state;
            for ball in &mut state.balls {
                if let Some(entity) = state.arena.get_mut(ball.id) {
                    kinetic::deflect_off_paddle(
                        &mut ball.body,
                        &entity.rect,
                        &paddle,
                        self.game_config.deflect_speed,
                    );
                }
            }
        }

        // Brick demolition: at most one vertical bounce per ball per tick,
        // however many bricks its box clipped.
        let mut pending_drops: Vec<(Rect, PowerUpKind)> = Vec::new();
        {
            let state = &mut self.state;
            for ball in &mut state.balls {
                let contacts =
                    collision::entity_vs_group(&mut state.arena, ball.id, &mut state.bricks, true);
                if contacts.is_empty() {
                    continue;
                }
                ball.body.bounce_vertical();
                for contact in &contacts {
                    let points = bricks::points(&self.game_config, &contact.target_rect);
                    state.game.add_points(points);
                    events.push(GameEvent::Scored { points });
                    if let Some(kind) = self.drop_table.roll(&mut self.rng) {
                        pending_drops.push((contact.target_rect, kind));
                    }
                }
            }
        }
        for (origin, kind) in pending_drops {
            powerups::spawn(
                &mut self.state.arena,
                &mut self.state.drops,
                &origin,
                kind,
                &self.game_config,
            );
        }

        powerups::fall(&mut self.state.arena, &mut self.state.drops, dt, &self.game_config);

        // Paddle catches drops.
        let caught = collision::entity_vs_group(
            &mut self.state.arena,
            self.state.paddle_id,
            &mut self.state.drops,
            true,
        );
        for contact in caught {
            if let EntityKind::PowerUp(kind) = contact.target_kind {
                self.apply_power_up(kind);
                events.push(GameEvent::PowerUpCollected { kind });
            }
        }

        // Every ball gone: lose a life and serve again, or end the game.
        if self.state.balls.is_empty() {
            if self.state.game.lose_life(0.0) == Phase::GameOver {
                events.push(GameEvent::GameOver { score: self.state.game.score });
                tracing::debug!(score = self.state.game.score, "brick breaker over");
            } else {
                events.push(GameEvent::LifeLost { lives: self.state.game.lives });
                self.state.drops.despawn_all(&mut self.state.arena);
                self.spawn_centered_ball();
            }
            return events;
        }

        if self.state.bricks.is_empty() {
            self.state.game.advance_level(0.0);
            events.push(GameEvent::LevelCleared { level: self.state.game.level });
            tracing::debug!(level = self.state.game.level, "wall cleared, rebuilding");
            self.rebuild_level();
        }

        events
    }

    fn sprites(&self) -> Vec<Sprite> {
        self.state.arena.sprites()
    }

    arcade_game_boilerplate!(state_type: BreakoutState);
}
