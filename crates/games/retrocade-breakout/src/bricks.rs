//! Brick wall construction and scoring.

use retrocade_core::entity::{Arena, EntityKind, Group};
use retrocade_core::rect::Rect;

use crate::config::BreakoutConfig;

/// Points for a brick in the top row; each row below is worth one step less.
const TOP_ROW_POINTS: u32 = 50;
const ROW_POINT_STEP: u32 = 10;

/// Spawn the full brick wall into `arena`, registering every brick in
/// `bricks`.
pub fn build(arena: &mut Arena, bricks: &mut Group, config: &BreakoutConfig) {
    for row in 0..config.brick_rows {
        for col in 0..config.brick_cols {
            let rect = Rect::new(
                config.brick_origin_x + col as f32 * config.brick_pitch_x,
                config.brick_origin_y + row as f32 * config.brick_pitch_y,
                config.brick_width,
                config.brick_height,
            );
            bricks.insert(arena.spawn(EntityKind::Brick, rect));
        }
    }
}

/// Point value of a brick, derived from the row its box sits in. Top rows
/// are worth more.
pub fn points(config: &BreakoutConfig, brick: &Rect) -> u32 {
    let row = ((brick.y - config.brick_origin_y) / config.brick_pitch_y).round().max(0.0) as u32;
    TOP_ROW_POINTS.saturating_sub(row * ROW_POINT_STEP)
}
