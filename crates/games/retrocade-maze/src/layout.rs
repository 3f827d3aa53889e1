//! Maze layout: which cells hold walls, pellets, and spawn points.

use retrocade_core::command::Dir;
use retrocade_core::entity::{Arena, EntityKind, Group, PelletKind};
use retrocade_core::grid::GridGeometry;
use retrocade_core::rect::Rect;

use crate::config::MazeConfig;

pub const COLS: usize = 16;
pub const ROWS: usize = 13;

/// Cell legend: 1 wall, 2 pellet, 3 power pellet.
pub const LAYOUT: [[u8; COLS]; ROWS] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 1],
    [1, 3, 1, 1, 2, 1, 2, 1, 1, 2, 1, 2, 1, 1, 3, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 1, 1, 2, 1, 1, 1, 1, 1, 1, 2, 1, 1, 2, 1],
    [1, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 2, 1, 2, 2, 2, 2, 1, 2, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 1, 1, 2, 1, 1, 1, 1, 1, 1, 2, 1, 1, 2, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 3, 1, 1, 2, 1, 2, 1, 1, 2, 1, 2, 1, 1, 3, 1],
    [1, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Where the player starts, and which way it faces.
pub const PLAYER_SPAWN: (i32, i32) = (8, 9);
pub const PLAYER_SPAWN_DIR: Dir = Dir::Right;

/// Open corridor cells the ghosts roam out from.
pub const GHOST_SPAWNS: [(i32, i32); 4] = [(6, 6), (7, 6), (8, 6), (9, 6)];

const PELLET_SIZE: f32 = 6.0;
const POWER_PELLET_SIZE: f32 = 16.0;

/// The maze is centered horizontally and hangs below the HUD band.
pub fn geometry(config: &MazeConfig) -> GridGeometry {
    GridGeometry {
        origin_x: (config.field_width - COLS as f32 * config.cell_width) / 2.0,
        origin_y: config.maze_top,
        cell_w: config.cell_width,
        cell_h: config.cell_height,
    }
}

/// Populate walls and pellets for one level. Clearing earlier contents is
/// the caller's job.
pub fn build(arena: &mut Arena, walls: &mut Group, pellets: &mut Group, geometry: &GridGeometry) {
    for (row, cells) in LAYOUT.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            let grid_cell = (col as i32, row as i32);
            match cell {
                1 => {
                    let id = arena.spawn(EntityKind::Wall, geometry.cell_rect(grid_cell));
                    walls.insert(id);
                }
                2 => {
                    let id = arena.spawn(
                        EntityKind::Pellet(PelletKind::Normal),
                        centered(geometry, grid_cell, PELLET_SIZE),
                    );
                    pellets.insert(id);
                }
                3 => {
                    let id = arena.spawn(
                        EntityKind::Pellet(PelletKind::Power),
                        centered(geometry, grid_cell, POWER_PELLET_SIZE),
                    );
                    pellets.insert(id);
                }
                _ => {}
            }
        }
    }
}

fn centered(geometry: &GridGeometry, cell: (i32, i32), size: f32) -> Rect {
    let (cx, cy) = geometry.cell_center(cell);
    Rect::from_center(cx, cy, size, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_counts_are_stable() {
        let mut walls = 0;
        let mut pellets = 0;
        let mut power = 0;
        for row in LAYOUT {
            for cell in row {
                match cell {
                    1 => walls += 1,
                    2 => pellets += 1,
                    3 => power += 1,
                    _ => {}
                }
            }
        }
        assert_eq!(walls, 106);
        assert_eq!(pellets, 98);
        assert_eq!(power, 4);
    }

    #[test]
    fn border_is_solid_wall() {
        for col in 0..COLS {
            assert_eq!(LAYOUT[0][col], 1);
            assert_eq!(LAYOUT[ROWS - 1][col], 1);
        }
        for row in LAYOUT {
            assert_eq!(row[0], 1);
            assert_eq!(row[COLS - 1], 1);
        }
    }

    #[test]
    fn spawn_cells_are_open() {
        let (col, row) = PLAYER_SPAWN;
        assert_ne!(LAYOUT[row as usize][col as usize], 1, "Player spawn is walled");
        for (col, row) in GHOST_SPAWNS {
            assert_ne!(
                LAYOUT[row as usize][col as usize],
                1,
                "Ghost spawn ({col}, {row}) is walled"
            );
        }
    }

    #[test]
    fn build_populates_arena_and_groups() {
        let config = MazeConfig::default();
        let geometry = geometry(&config);
        let mut arena = Arena::new();
        let mut walls = Group::new();
        let mut pellets = Group::new();

        build(&mut arena, &mut walls, &mut pellets, &geometry);
        assert_eq!(walls.len(), 106);
        assert_eq!(pellets.len(), 102, "98 pellets plus 4 power pellets");
        assert_eq!(arena.len(), 208);
    }

    #[test]
    fn maze_is_centered_on_the_field() {
        let config = MazeConfig::default();
        let geometry = geometry(&config);
        assert_eq!(geometry.origin_x, (1920.0 - 960.0) / 2.0);
        assert_eq!(geometry.origin_y, 100.0);
    }
}
