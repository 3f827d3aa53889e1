use serde::{Deserialize, Serialize};

/// Lifecycle phase of one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    LevelTransition,
    Respawn,
    GameOver,
}

/// Score, lives, and level, plus the phase machine that freezes simulation
/// around deaths and level changes. Lives saturate at zero and the level
/// only ever increases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub phase: Phase,
    phase_timer: f32,
}

impl GameState {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            level: 1,
            phase: Phase::Playing,
            phase_timer: 0.0,
        }
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Lose one life, entering `Respawn` (frozen for `respawn_delay`) or
    /// `GameOver` when none remain. Returns the phase entered.
    pub fn lose_life(&mut self, respawn_delay: f32) -> Phase {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = Phase::GameOver;
        } else {
            self.phase = Phase::Respawn;
            self.phase_timer = respawn_delay;
        }
        self.phase
    }

    /// Advance to the next level, freezing for `transition_delay`.
    pub fn advance_level(&mut self, transition_delay: f32) {
        self.level += 1;
        self.phase = Phase::LevelTransition;
        self.phase_timer = transition_delay;
    }

    /// Unconditional loss regardless of remaining lives (a formation
    /// reaching the player row).
    pub fn game_over(&mut self) {
        self.phase = Phase::GameOver;
    }

    /// Tick the phase machine; returns whether the simulation should run
    /// this tick. A freeze that expires flips back to `Playing` but the
    /// expiring tick itself stays frozen. `GameOver` is terminal.
    pub fn tick_phase(&mut self, dt: f32) -> bool {
        match self.phase {
            Phase::Playing => true,
            Phase::GameOver => false,
            Phase::LevelTransition | Phase::Respawn => {
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    self.phase = Phase::Playing;
                }
                false
            }
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
