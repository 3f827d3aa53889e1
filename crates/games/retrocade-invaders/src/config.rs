use serde::{Deserialize, Serialize};

/// Data-driven configuration for the wave shooter game.
/// All distances are in field units, all speeds in units per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvadersConfig {
    /// Play field width.
    pub field_width: f32,
    /// Play field height.
    pub field_height: f32,
    /// Ship box width.
    pub ship_width: f32,
    /// Ship box height.
    pub ship_height: f32,
    /// Distance from the field bottom up to the ship top.
    pub ship_raise: f32,
    /// Ship movement speed.
    pub ship_speed: f32,
    /// Bullet box width, both owners.
    pub bullet_width: f32,
    /// Bullet box height, both owners.
    pub bullet_height: f32,
    /// Upward speed of the ship's bullets.
    pub player_bullet_speed: f32,
    /// Downward speed of the formation's bullets.
    pub alien_bullet_speed: f32,
    /// Minimum seconds between two ship shots.
    pub fire_interval: f32,
    /// Minimum seconds between two formation volleys.
    pub volley_interval: f32,
    /// Formation rows.
    pub formation_rows: usize,
    /// Formation columns.
    pub formation_cols: usize,
    /// Member box width.
    pub member_width: f32,
    /// Member box height.
    pub member_height: f32,
    /// Column-to-column spacing between member centers.
    pub formation_pitch_x: f32,
    /// Row-to-row spacing between member centers.
    pub formation_pitch_y: f32,
    /// Center of the top formation row.
    pub formation_top: f32,
    /// Formation speed on the first level.
    pub formation_speed: f32,
    /// Speed added per level beyond the first.
    pub formation_speed_per_level: f32,
    /// Downward shift on each reversal.
    pub formation_step_down: f32,
    /// Side margin that triggers a reversal.
    pub formation_margin: f32,
    /// Number of bunker shields.
    pub bunker_count: usize,
    /// Edge of one bunker block.
    pub bunker_block_size: f32,
    /// Distance from the field bottom up to the bunker tops.
    pub bunker_raise: f32,
    /// Starting lives.
    pub lives: u32,
    /// Freeze between waves, in seconds.
    pub wave_banner_delay: f32,
}

impl Default for InvadersConfig {
    fn default() -> Self {
        Self {
            field_width: 1920.0,
            field_height: 1080.0,
            ship_width: 50.0,
            ship_height: 40.0,
            ship_raise: 60.0,
            ship_speed: 480.0,
            bullet_width: 3.0,
            bullet_height: 12.0,
            player_bullet_speed: 720.0,
            alien_bullet_speed: 480.0,
            fire_interval: 0.4,
            volley_interval: 0.8,
            formation_rows: 5,
            formation_cols: 11,
            member_width: 44.0,
            member_height: 32.0,
            formation_pitch_x: 60.0,
            formation_pitch_y: 50.0,
            formation_top: 80.0,
            formation_speed: 90.0,
            formation_speed_per_level: 18.0,
            formation_step_down: 16.0,
            formation_margin: 20.0,
            bunker_count: 4,
            bunker_block_size: 8.0,
            bunker_raise: 180.0,
            lives: 3,
            wave_banner_delay: 2.0,
        }
    }
}

impl InvadersConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("RETROCADE_INVADERS_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }

        if let Ok(contents) = std::fs::read_to_string("config/invaders.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }

        Self::default()
    }
}
