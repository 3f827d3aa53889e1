use serde::{Deserialize, Serialize};

use crate::entity::{Arena, Group};

/// Outcome of one formation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced,
    Reversed,
}

/// Lockstep swarm movement: every member shares one heading and speed. When
/// any member touches a side margin the whole group reverses and steps down
/// in that same tick, with no horizontal motion that tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Formation {
    /// +1.0 rightward, -1.0 leftward.
    pub heading: f32,
    pub speed: f32,
    pub step_down: f32,
    pub left_margin: f32,
    pub right_margin: f32,
}

impl Formation {
    /// Margin contact under the current heading, checked before any member
    /// moves this tick.
    fn at_margin(&self, arena: &Arena, members: &Group) -> bool {
        members
            .ids()
            .iter()
            .filter_map(|&id| arena.rect(id))
            .any(|rect| {
                (self.heading > 0.0 && rect.right() >= self.right_margin)
                    || (self.heading < 0.0 && rect.left() <= self.left_margin)
            })
    }

    /// Advance the whole group by one tick.
    pub fn step(&mut self, arena: &mut Arena, members: &Group, dt: f32) -> StepOutcome {
        if self.at_margin(arena, members) {
            self.heading = -self.heading;
            for &id in members.ids() {
                if let Some(entity) = arena.get_mut(id) {
                    entity.rect.y += self.step_down;
                }
            }
            StepOutcome::Reversed
        } else {
            let dx = self.speed * self.heading * dt;
            for &id in members.ids() {
                if let Some(entity) = arena.get_mut(id) {
                    entity.rect.x += dx;
                }
            }
            StepOutcome::Advanced
        }
    }

    /// Lowest member bottom edge, for the reached-the-player check.
    pub fn lowest_bottom(&self, arena: &Arena, members: &Group) -> Option<f32> {
        members
            .ids()
            .iter()
            .filter_map(|&id| arena.rect(id))
            .map(|rect| rect.bottom())
            .reduce(f32::max)
    }
}
