use serde::{Deserialize, Serialize};

/// Data-driven configuration for the snake game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Play field width.
    pub field_width: f32,
    /// Play field height.
    pub field_height: f32,
    /// Edge of one body segment; the field is a grid of these cells.
    pub cell_size: f32,
    /// Seconds of simulation time per head step.
    pub step_interval: f32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            field_width: 1920.0,
            field_height: 1080.0,
            cell_size: 10.0,
            step_interval: 1.0 / 15.0,
        }
    }
}

impl SnakeConfig {
    pub fn cols(&self) -> i32 {
        (self.field_width / self.cell_size) as i32
    }

    pub fn rows(&self) -> i32 {
        (self.field_height / self.cell_size) as i32
    }

    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("RETROCADE_SNAKE_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }

        if let Ok(contents) = std::fs::read_to_string("config/snake.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }

        Self::default()
    }
}
