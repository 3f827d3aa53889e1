use serde::{Deserialize, Serialize};

use crate::entity::PowerUpKind;
use crate::rng::GameRng;

/// Default probability that a destroyed brick drops a power-up.
pub const DEFAULT_DROP_CHANCE: f32 = 0.3;

/// Probabilistic power-up roll: a fixed drop chance, then a uniform pick
/// among the kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DropTable {
    pub chance: f32,
}

impl DropTable {
    pub fn new(chance: f32) -> Self {
        Self { chance }
    }

    /// Roll a drop for one destroyed entity.
    pub fn roll(&self, rng: &mut GameRng) -> Option<PowerUpKind> {
        if rng.chance(self.chance) {
            Some(PowerUpKind::ALL[rng.pick_index(PowerUpKind::ALL.len())])
        } else {
            None
        }
    }
}

impl Default for DropTable {
    fn default() -> Self {
        Self::new(DEFAULT_DROP_CHANCE)
    }
}
