//! Formation waves and bunker shields.

use retrocade_core::entity::{AlienKind, Arena, EntityKind, Group};
use retrocade_core::rect::Rect;

use crate::config::InvadersConfig;

/// One bunker shield as a bitmap of blocks; `1` spawns a block. The notch at
/// the bottom leaves room for the ship to shelter underneath.
pub const BUNKER_PATTERN: [[u8; 16]; 8] = [
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
];

/// Member kind by formation row; top rows are worth more.
pub fn row_kind(row: usize) -> AlienKind {
    match row {
        0 => AlienKind::Red,
        1 | 2 => AlienKind::Yellow,
        _ => AlienKind::Green,
    }
}

/// Center of the top-left formation member; the whole grid of member
/// centers is horizontally centered in the field.
pub fn formation_origin_x(config: &InvadersConfig) -> f32 {
    (config.field_width - (config.formation_cols - 1) as f32 * config.formation_pitch_x) / 2.0
}

/// Spawn a full formation into `arena`, registering every member in
/// `aliens`.
pub fn build_wave(arena: &mut Arena, aliens: &mut Group, config: &InvadersConfig) {
    let origin_x = formation_origin_x(config);
    for row in 0..config.formation_rows {
        for col in 0..config.formation_cols {
            let rect = Rect::from_center(
                origin_x + col as f32 * config.formation_pitch_x,
                config.formation_top + row as f32 * config.formation_pitch_y,
                config.member_width,
                config.member_height,
            );
            aliens.insert(arena.spawn(EntityKind::AlienFormationMember(row_kind(row)), rect));
        }
    }
}

/// Spawn the bunker shields, evenly spaced across the field width.
pub fn build_bunkers(arena: &mut Arena, bunkers: &mut Group, config: &InvadersConfig) {
    let block = config.bunker_block_size;
    let width = BUNKER_PATTERN[0].len() as f32 * block;
    let top = config.field_height - config.bunker_raise;
    for i in 0..config.bunker_count {
        let center_x = config.field_width * (i + 1) as f32 / (config.bunker_count + 1) as f32;
        let left = center_x - width / 2.0;
        for (row, cells) in BUNKER_PATTERN.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let rect = Rect::new(
                    left + col as f32 * block,
                    top + row as f32 * block,
                    block,
                    block,
                );
                bunkers.insert(arena.spawn(EntityKind::Bunker, rect));
            }
        }
    }
}
