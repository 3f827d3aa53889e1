pub mod config;
pub mod wave;

use serde::{Deserialize, Serialize};

use retrocade_core::arcade_game_boilerplate;
use retrocade_core::collision::{self, SweepPolicy};
use retrocade_core::command::Command;
use retrocade_core::cooldown::Cooldown;
use retrocade_core::entity::{Arena, BulletOwner, EntityId, EntityKind, Group, Sprite};
use retrocade_core::formation::Formation;
use retrocade_core::game_trait::{ArcadeGame, GameEvent, GameMetadata};
use retrocade_core::rect::Rect;
use retrocade_core::rng::GameRng;
use retrocade_core::state::{GameState, Phase};

use crate::config::InvadersConfig;

/// Serializable wave shooter state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvadersState {
    pub arena: Arena,
    pub aliens: Group,
    pub bunkers: Group,
    pub player_bullets: Group,
    pub alien_bullets: Group,
    pub ship_id: EntityId,
    pub formation: Formation,
    pub fire_gate: Cooldown,
    pub volley_gate: Cooldown,
    /// Accumulated simulation seconds; the cooldowns run on this clock, so
    /// pauses and freezes never count against them.
    pub sim_time: f32,
    pub game: GameState,
}

/// The wave shooter: thin out the descending formation from behind the
/// bunker line before it reaches the ship.
pub struct WaveShooter {
    state: InvadersState,
    rng: GameRng,
    paused: bool,
    game_config: InvadersConfig,
}

impl WaveShooter {
    pub fn new() -> Self {
        Self::with_config(InvadersConfig::load())
    }

    pub fn with_config(config: InvadersConfig) -> Self {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Build with an explicit random source; tests and replays seed it.
    pub fn with_rng(config: InvadersConfig, rng: GameRng) -> Self {
        let mut arena = Arena::new();
        let ship_rect = Rect::new(
            (config.field_width - config.ship_width) / 2.0,
            config.field_height - config.ship_raise,
            config.ship_width,
            config.ship_height,
        );
        let ship_id = arena.spawn(EntityKind::Actor, ship_rect);
        let formation = Formation {
            heading: 1.0,
            speed: config.formation_speed,
            step_down: config.formation_step_down,
            left_margin: config.formation_margin,
            right_margin: config.field_width - config.formation_margin,
        };
        let mut game = Self {
            state: InvadersState {
                arena,
                aliens: Group::new(),
                bunkers: Group::new(),
                player_bullets: Group::new(),
                alien_bullets: Group::new(),
                ship_id,
                formation,
                fire_gate: Cooldown::new(config.fire_interval),
                volley_gate: Cooldown::new(config.volley_interval),
                sim_time: 0.0,
                game: GameState::new(config.lives),
            },
            rng,
            paused: false,
            game_config: config,
        };
        wave::build_wave(&mut game.state.arena, &mut game.state.aliens, &game.game_config);
        wave::build_bunkers(&mut game.state.arena, &mut game.state.bunkers, &game.game_config);
        game
    }

    pub fn state(&self) -> &InvadersState {
        &self.state
    }

    pub fn config(&self) -> &InvadersConfig {
        &self.game_config
    }

    fn move_ship(&mut self, direction: f32, dt: f32) {
        if let Some(ship) = self.state.arena.get_mut(self.state.ship_id) {
            ship.rect.x = (ship.rect.x + direction * self.game_config.ship_speed * dt)
                .clamp(0.0, self.game_config.field_width - ship.rect.w);
        }
    }

    fn recenter_ship(&mut self) {
        if let Some(ship) = self.state.arena.get_mut(self.state.ship_id) {
            ship.rect.x = (self.game_config.field_width - ship.rect.w) / 2.0;
        }
    }

    fn fire_player_bullet(&mut self) {
        if !self.state.fire_gate.try_fire(self.state.sim_time) {
            tracing::trace!("shot gated by cooldown");
            return;
        }
        let Some(ship) = self.state.arena.rect(self.state.ship_id) else {
            return;
        };
        let config = &self.game_config;
        let rect = Rect::from_center(
            ship.center_x(),
            ship.top() - config.bullet_height / 2.0,
            config.bullet_width,
            config.bullet_height,
        );
        let id = self.state.arena.spawn(EntityKind::Bullet(BulletOwner::Player), rect);
        self.state.player_bullets.insert(id);
    }

    /// A uniformly random live member fires straight down.
    fn alien_volley(&mut self) {
        if self.state.aliens.is_empty() || !self.state.volley_gate.try_fire(self.state.sim_time) {
            return;
        }
        let shooters = self.state.aliens.ids();
        let shooter = shooters[self.rng.pick_index(shooters.len())];
        let Some(member) = self.state.arena.rect(shooter) else {
            return;
        };
        let config = &self.game_config;
        let rect = Rect::from_center(
            member.center_x(),
            member.bottom() + config.bullet_height / 2.0,
            config.bullet_width,
            config.bullet_height,
        );
        let id = self.state.arena.spawn(EntityKind::Bullet(BulletOwner::Alien), rect);
        self.state.alien_bullets.insert(id);
    }

    /// Ship down, by ram or bullet. Ends the game on the last life,
    /// otherwise recenters the ship and plays on.
    fn lose_ship(&mut self, mut events: Vec<GameEvent>) -> Vec<GameEvent> {
        if self.state.game.lose_life(0.0) == Phase::GameOver {
            events.push(GameEvent::GameOver { score: self.state.game.score });
            tracing::debug!(score = self.state.game.score, "wave shooter over");
        } else {
            events.push(GameEvent::LifeLost { lives: self.state.game.lives });
            self.recenter_ship();
        }
        events
    }

    /// Fresh formation for the next level, marching faster and rightward
    /// again. Bullets already in flight stay in flight.
    fn next_wave(&mut self) {
        let config = &self.game_config;
        self.state.formation.heading = 1.0;
        self.state.formation.speed = config.formation_speed
            + config.formation_speed_per_level * (self.state.game.level - 1) as f32;
        wave::build_wave(&mut self.state.arena, &mut self.state.aliens, config);
    }
}

impl Default for WaveShooter {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance every bullet in `bullets` by `vy`, despawning the ones that left
/// the field through either end.
fn advance_bullets(arena: &mut Arena, bullets: &mut Group, vy: f32, dt: f32, field_height: f32) {
    let ids: Vec<EntityId> = bullets.ids().to_vec();
    for id in ids {
        let gone = match arena.get_mut(id) {
            Some(entity) => {
                entity.rect.y += vy * dt;
                entity.rect.bottom() < 0.0 || entity.rect.top() > field_height
            }
            None => continue,
        };
        if gone {
            arena.despawn(id);
            bullets.remove(id);
        }
    }
}

impl ArcadeGame for WaveShooter {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Wave Shooter".to_string(),
            description: "Break the descending formation before it reaches the ship".to_string(),
        }
    }

    fn update(&mut self, dt: f32, command: Command) -> Vec<GameEvent> {
        if self.paused || !self.state.game.tick_phase(dt) {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.state.sim_time += dt;

        match command {
            Command::Left => self.move_ship(-1.0, dt),
            Command::Right => self.move_ship(1.0, dt),
            Command::Shoot => self.fire_player_bullet(),
            _ => {}
        }

        advance_bullets(
            &mut self.state.arena,
            &mut self.state.player_bullets,
            -self.game_config.player_bullet_speed,
            dt,
            self.game_config.field_height,
        );
        advance_bullets(
            &mut self.state.arena,
            &mut self.state.alien_bullets,
            self.game_config.alien_bullet_speed,
            dt,
            self.game_config.field_height,
        );

        {
            let state = &mut self.state;
            state.formation.step(&mut state.arena, &state.aliens, dt);
        }

        // Ship fire against the wave.
        let downed = collision::group_vs_group(
            &mut self.state.arena,
            &mut self.state.player_bullets,
            &mut self.state.aliens,
            SweepPolicy::REMOVE_BOTH,
        );
        for contact in &downed {
            if let EntityKind::AlienFormationMember(kind) = contact.target_kind {
                let points = kind.points();
                self.state.game.add_points(points);
                events.push(GameEvent::Scored { points });
            }
        }

        // Bunkers absorb fire from both sides, and the wave plows through
        // them on its way down.
        collision::group_vs_group(
            &mut self.state.arena,
            &mut self.state.alien_bullets,
            &mut self.state.bunkers,
            SweepPolicy::REMOVE_BOTH,
        );
        collision::group_vs_group(
            &mut self.state.arena,
            &mut self.state.player_bullets,
            &mut self.state.bunkers,
            SweepPolicy::REMOVE_BOTH,
        );
        collision::group_vs_group(
            &mut self.state.arena,
            &mut self.state.aliens,
            &mut self.state.bunkers,
            SweepPolicy::REMOVE_TARGET,
        );

        // Rammed by a member.
        let rammed = collision::entity_vs_group(
            &mut self.state.arena,
            self.state.ship_id,
            &mut self.state.aliens,
            false,
        );
        if !rammed.is_empty() {
            return self.lose_ship(events);
        }

        // The wave reaching the ship line ends the game outright, lives or
        // not.
        if let (Some(bottom), Some(ship)) = (
            self.state.formation.lowest_bottom(&self.state.arena, &self.state.aliens),
            self.state.arena.rect(self.state.ship_id),
        ) && bottom >= ship.top()
        {
            self.state.game.game_over();
            events.push(GameEvent::GameOver { score: self.state.game.score });
            tracing::debug!(score = self.state.game.score, "formation reached the ship line");
            return events;
        }

        if self.state.aliens.is_empty() {
            self.state.game.advance_level(self.game_config.wave_banner_delay);
            events.push(GameEvent::LevelCleared { level: self.state.game.level });
            tracing::debug!(level = self.state.game.level, "wave cleared");
            self.next_wave();
            return events;
        }

        self.alien_volley();

        // Formation fire against the ship.
        let hit = collision::entity_vs_group(
            &mut self.state.arena,
            self.state.ship_id,
            &mut self.state.alien_bullets,
            true,
        );
        if !hit.is_empty() {
            return self.lose_ship(events);
        }

        events
    }

    fn sprites(&self) -> Vec<Sprite> {
        self.state.arena.sprites()
    }

    arcade_game_boilerplate!(state_type: InvadersState);
}
