use serde::{Deserialize, Serialize};

use crate::command::Dir;
use crate::rect::Rect;

/// Arrival tolerance when snapping onto a cell center, in field units.
const SNAP_EPSILON: f32 = 1e-3;

/// Maps grid cells to field-space boxes and centers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridGeometry {
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell_w: f32,
    pub cell_h: f32,
}

impl GridGeometry {
    pub fn cell_center(&self, cell: (i32, i32)) -> (f32, f32) {
        (
            self.origin_x + (cell.0 as f32 + 0.5) * self.cell_w,
            self.origin_y + (cell.1 as f32 + 0.5) * self.cell_h,
        )
    }

    pub fn cell_rect(&self, cell: (i32, i32)) -> Rect {
        Rect::new(
            self.origin_x + cell.0 as f32 * self.cell_w,
            self.origin_y + cell.1 as f32 * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }
}

/// Continuous mover over a cell grid. The mover is either at rest on a cell
/// center or in transit toward the neighboring `target` cell; direction
/// changes commit only at rest, and a queued turn beats continuing straight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridMover {
    pub cell: (i32, i32),
    pub target: Option<(i32, i32)>,
    pub x: f32,
    pub y: f32,
    pub current_dir: Dir,
    pub queued_dir: Option<Dir>,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl GridMover {
    pub fn new(
        geometry: &GridGeometry,
        cell: (i32, i32),
        dir: Dir,
        speed: f32,
        width: f32,
        height: f32,
    ) -> Self {
        let (x, y) = geometry.cell_center(cell);
        Self {
            cell,
            target: None,
            x,
            y,
            current_dir: dir,
            queued_dir: None,
            speed,
            width,
            height,
        }
    }

    /// Queue a direction change; it commits at the next cell center where
    /// the turn is unobstructed.
    pub fn queue(&mut self, dir: Dir) {
        self.queued_dir = Some(dir);
    }

    pub fn is_moving(&self) -> bool {
        self.target.is_some()
    }

    /// Bounding box centered on the mover's position.
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.width, self.height)
    }

    /// Snap back onto `cell` at rest with all motion state cleared.
    pub fn reset(&mut self, geometry: &GridGeometry, cell: (i32, i32), dir: Dir) {
        let (x, y) = geometry.cell_center(cell);
        self.cell = cell;
        self.target = None;
        self.x = x;
        self.y = y;
        self.current_dir = dir;
        self.queued_dir = None;
    }

    /// Advance by up to `dt` seconds, walking cell to cell through open
    /// cells. Arrivals land exactly on the center, and only the time a leg
    /// actually needed is spent, so a chain of ticks summing to exactly one
    /// leg ends at rest on the target center.
    pub fn update(&mut self, geometry: &GridGeometry, dt: f32, walls: &[Rect]) {
        if self.speed <= 0.0 {
            return;
        }
        let mut remaining = dt;
        while remaining > 0.0 {
            if self.target.is_none() && !self.pick_target(geometry, walls) {
                return;
            }
            let Some(target) = self.target else { return };
            let (tx, ty) = geometry.cell_center(target);
            // Position always lies on the segment toward the target, so the
            // axis distances sum to the straight-line distance.
            let dist = (tx - self.x).abs() + (ty - self.y).abs();
            let step = self.speed * remaining;
            if step + SNAP_EPSILON >= dist {
                self.x = tx;
                self.y = ty;
                self.cell = target;
                self.target = None;
                remaining -= dist / self.speed;
                if remaining <= SNAP_EPSILON / self.speed {
                    return;
                }
            } else {
                let (ux, uy) = self.current_dir.unit();
                self.x += ux * step;
                self.y += uy * step;
                return;
            }
        }
    }

    /// Decide the next leg while at rest. A queued turn wins when its cell
    /// is open; otherwise continue straight when open; otherwise stay put.
    fn pick_target(&mut self, geometry: &GridGeometry, walls: &[Rect]) -> bool {
        if let Some(queued) = self.queued_dir {
            if queued == self.current_dir {
                self.queued_dir = None;
            } else if self.cell_open(geometry, step_cell(self.cell, queued), walls) {
                self.current_dir = queued;
                self.queued_dir = None;
                self.target = Some(step_cell(self.cell, queued));
                return true;
            }
        }
        let ahead = step_cell(self.cell, self.current_dir);
        if self.cell_open(geometry, ahead, walls) {
            self.target = Some(ahead);
            return true;
        }
        false
    }

    /// A cell is open when a hypothetical mover box centered there clears
    /// every wall.
    fn cell_open(&self, geometry: &GridGeometry, cell: (i32, i32), walls: &[Rect]) -> bool {
        let (cx, cy) = geometry.cell_center(cell);
        let probe = Rect::from_center(cx, cy, self.width, self.height);
        !probe.intersects_any(walls)
    }
}

fn step_cell(cell: (i32, i32), dir: Dir) -> (i32, i32) {
    let (dc, dr) = dir.grid_step();
    (cell.0 + dc, cell.1 + dr)
}
