use serde::{Deserialize, Serialize};

use crate::command::Dir;
use crate::rect::Rect;
use crate::rng::GameRng;

/// Seconds between spontaneous heading re-rolls.
pub const REDIRECT_INTERVAL: f32 = 1.0;

/// Roaming agent: drifts along a cardinal heading, re-rolling it on a timer
/// and on every wall contact. The timer restarts on every re-roll, whether
/// spontaneous or forced by a wall.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wanderer {
    pub dir: Dir,
    pub redirect_timer: f32,
    pub speed: f32,
}

impl Wanderer {
    pub fn new(dir: Dir, speed: f32) -> Self {
        Self {
            dir,
            redirect_timer: 0.0,
            speed,
        }
    }

    /// Advance `rect` by one tick. A move that lands inside a wall is
    /// reverted wholesale before the heading re-rolls.
    pub fn update(&mut self, rect: &mut Rect, dt: f32, walls: &[Rect], rng: &mut GameRng) {
        self.redirect_timer += dt;
        if self.redirect_timer > REDIRECT_INTERVAL {
            self.redirect(rng);
        }

        let (ux, uy) = self.dir.unit();
        let old_x = rect.x;
        let old_y = rect.y;
        rect.x += ux * self.speed * dt;
        rect.y += uy * self.speed * dt;

        if rect.intersects_any(walls) {
            rect.x = old_x;
            rect.y = old_y;
            self.redirect(rng);
        }
    }

    fn redirect(&mut self, rng: &mut GameRng) {
        self.dir = rng.direction();
        self.redirect_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drifts_along_its_heading() {
        let mut rng = GameRng::seeded(1);
        let mut wanderer = Wanderer::new(Dir::Right, 120.0);
        let mut rect = Rect::new(100.0, 100.0, 30.0, 30.0);

        wanderer.update(&mut rect, 0.1, &[], &mut rng);
        assert_eq!(rect.x, 112.0);
        assert_eq!(rect.y, 100.0);
    }

    #[test]
    fn timer_rerolls_after_the_interval() {
        let mut rng = GameRng::seeded(1);
        let mut wanderer = Wanderer::new(Dir::Right, 0.0);
        let mut rect = Rect::new(0.0, 0.0, 30.0, 30.0);

        for _ in 0..59 {
            wanderer.update(&mut rect, 1.0 / 60.0, &[], &mut rng);
        }
        assert!(wanderer.redirect_timer > 0.9, "Timer should be nearly due");

        // Crossing the interval resets the timer even if the same heading is
        // drawn again.
        for _ in 0..3 {
            wanderer.update(&mut rect, 1.0 / 60.0, &[], &mut rng);
        }
        assert!(
            wanderer.redirect_timer < 0.5,
            "Timer must restart after a re-roll, was {}",
            wanderer.redirect_timer
        );
    }

    #[test]
    fn wall_contact_reverts_the_move_and_rerolls() {
        let mut rng = GameRng::seeded(7);
        let mut wanderer = Wanderer::new(Dir::Right, 120.0);
        let mut rect = Rect::new(100.0, 100.0, 30.0, 30.0);
        let wall = Rect::new(131.0, 100.0, 60.0, 50.0);

        wanderer.update(&mut rect, 0.1, &[wall], &mut rng);
        assert_eq!(rect.x, 100.0, "Blocked move must revert to the old position");
        assert_eq!(rect.y, 100.0);
        assert_eq!(wanderer.redirect_timer, 0.0, "Wall contact must restart the timer");
    }

    #[test]
    fn seeded_wanderers_roam_identically() {
        let walls = [Rect::new(200.0, 0.0, 60.0, 400.0)];
        let mut run = |seed: u64| {
            let mut rng = GameRng::seeded(seed);
            let mut wanderer = Wanderer::new(Dir::Right, 120.0);
            let mut rect = Rect::new(100.0, 100.0, 30.0, 30.0);
            for _ in 0..300 {
                wanderer.update(&mut rect, 1.0 / 60.0, &walls, &mut rng);
            }
            (rect.x, rect.y)
        };
        assert_eq!(run(42), run(42));
    }
}
