use serde::{Deserialize, Serialize};

/// Data-driven configuration for the maze chase game.
/// All distances are in field units, all speeds in units per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Play field width.
    pub field_width: f32,
    /// Play field height.
    pub field_height: f32,
    /// Grid cell width.
    pub cell_width: f32,
    /// Grid cell height.
    pub cell_height: f32,
    /// Top edge of the maze, below the HUD band.
    pub maze_top: f32,
    /// Bounding box edge of the player and the ghosts.
    pub actor_size: f32,
    /// Player movement speed.
    pub player_speed: f32,
    /// Ghost roaming speed.
    pub ghost_speed: f32,
    /// Starting lives.
    pub lives: u32,
    /// Freeze after losing a life, in seconds.
    pub respawn_delay: f32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            field_width: 1920.0,
            field_height: 1080.0,
            cell_width: 60.0,
            cell_height: 50.0,
            maze_top: 100.0,
            actor_size: 30.0,
            player_speed: 240.0,
            ghost_speed: 120.0,
            lives: 3,
            respawn_delay: 1.0,
        }
    }
}

impl MazeConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("RETROCADE_MAZE_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }

        if let Ok(contents) = std::fs::read_to_string("config/maze.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }

        Self::default()
    }
}
