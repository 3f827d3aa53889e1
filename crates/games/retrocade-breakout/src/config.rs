use serde::{Deserialize, Serialize};

/// Data-driven configuration for the brick breaker game.
/// All distances are in field units, all speeds in units per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutConfig {
    /// Play field width.
    pub field_width: f32,
    /// Play field height.
    pub field_height: f32,
    /// Balls bounce off this line instead of the true top edge, leaving a
    /// band for the HUD.
    pub hud_line: f32,
    /// Paddle starting width.
    pub paddle_width: f32,
    /// Paddle height.
    pub paddle_height: f32,
    /// Paddle movement speed.
    pub paddle_speed: f32,
    /// Distance from the field bottom up to the paddle top.
    pub paddle_raise: f32,
    /// Widest the paddle can grow through power-ups.
    pub paddle_max_width: f32,
    /// Width multiplier applied per widen power-up.
    pub paddle_grow_factor: f32,
    /// Ball bounding box edge.
    pub ball_size: f32,
    /// Horizontal launch speed magnitude; launch direction is random.
    pub ball_speed_x: f32,
    /// Vertical launch speed magnitude; balls always launch upward.
    pub ball_speed_y: f32,
    /// Per-component ball speed ceiling.
    pub ball_max_speed: f32,
    /// Horizontal speed at the paddle edges after a deflection.
    pub deflect_speed: f32,
    /// Brick wall rows.
    pub brick_rows: usize,
    /// Brick wall columns.
    pub brick_cols: usize,
    /// Brick box width.
    pub brick_width: f32,
    /// Brick box height.
    pub brick_height: f32,
    /// Top-left corner of the brick wall.
    pub brick_origin_x: f32,
    pub brick_origin_y: f32,
    /// Column-to-column spacing.
    pub brick_pitch_x: f32,
    /// Row-to-row spacing.
    pub brick_pitch_y: f32,
    /// Probability that a destroyed brick drops a power-up.
    pub drop_chance: f32,
    /// Power-up box edge.
    pub drop_size: f32,
    /// Power-up fall speed.
    pub drop_fall_speed: f32,
    /// Balls added by the extra-balls power-up.
    pub extra_ball_count: usize,
    /// Velocity multiplier applied by the speed power-up.
    pub speed_up_factor: f32,
    /// Starting lives.
    pub lives: u32,
}

impl Default for BreakoutConfig {
    fn default() -> Self {
        Self {
            field_width: 1920.0,
            field_height: 1080.0,
            hud_line: 60.0,
            paddle_width: 120.0,
            paddle_height: 20.0,
            paddle_speed: 720.0,
            paddle_raise: 50.0,
            paddle_max_width: 300.0,
            paddle_grow_factor: 1.5,
            ball_size: 16.0,
            ball_speed_x: 300.0,
            ball_speed_y: 360.0,
            ball_max_speed: 600.0,
            deflect_speed: 360.0,
            brick_rows: 5,
            brick_cols: 20,
            brick_width: 70.0,
            brick_height: 25.0,
            brick_origin_x: 80.0,
            brick_origin_y: 100.0,
            brick_pitch_x: 80.0,
            brick_pitch_y: 35.0,
            drop_chance: 0.3,
            drop_size: 20.0,
            drop_fall_speed: 180.0,
            extra_ball_count: 2,
            speed_up_factor: 1.5,
            lives: 3,
        }
    }
}

impl BreakoutConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("RETROCADE_BREAKOUT_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }

        if let Ok(contents) = std::fs::read_to_string("config/breakout.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }

        Self::default()
    }
}
