use serde::{Deserialize, Serialize};

use crate::rect::Rect;

/// Free-moving body: a velocity plus a per-component speed ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticBody {
    pub vx: f32,
    pub vy: f32,
    pub max_speed: f32,
}

/// Reflective field edges for a kinetic body. There is no bottom edge:
/// falling out the bottom is a miss, not a bounce.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReflectBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
}

impl KineticBody {
    pub fn new(vx: f32, vy: f32, max_speed: f32) -> Self {
        Self { vx, vy, max_speed }
    }

    /// Integrate one step and reflect off the side and top bounds. The box
    /// is clamped back inside on reflection, so it can never rest beyond an
    /// edge, and the outgoing velocity always points back into the field.
    pub fn integrate(&mut self, rect: &mut Rect, dt: f32, bounds: &ReflectBounds) {
        rect.x += self.vx * dt;
        rect.y += self.vy * dt;

        if rect.left() < bounds.left {
            rect.x = bounds.left;
            self.vx = self.vx.abs();
        } else if rect.right() > bounds.right {
            rect.x = bounds.right - rect.w;
            self.vx = -self.vx.abs();
        }
        if rect.top() < bounds.top {
            rect.y = bounds.top;
            self.vy = self.vy.abs();
        }
    }

    /// Integrate one step with no reflection (bullets).
    pub fn advance(&self, rect: &mut Rect, dt: f32) {
        rect.x += self.vx * dt;
        rect.y += self.vy * dt;
    }

    /// Scale both velocity components, capping each at `max_speed`.
    pub fn speed_up(&mut self, factor: f32) {
        self.vx = (self.vx * factor).clamp(-self.max_speed, self.max_speed);
        self.vy = (self.vy * factor).clamp(-self.max_speed, self.max_speed);
    }

    /// Reverse vertical travel (brick bounce).
    pub fn bounce_vertical(&mut self) {
        self.vy = -self.vy;
    }
}

/// Paddle deflection. Only a body moving downward that overlaps the paddle
/// bounces: its vertical speed flips upward and its horizontal speed is set
/// from the contact offset, mapped linearly from the paddle center to
/// ±`deflect_speed` at the edges. Returns whether a bounce happened.
pub fn deflect_off_paddle(
    body: &mut KineticBody,
    rect: &Rect,
    paddle: &Rect,
    deflect_speed: f32,
) -> bool {
    if body.vy <= 0.0 || !rect.intersects(paddle) {
        return false;
    }
    let half = paddle.w / 2.0;
    let offset = ((rect.center_x() - paddle.center_x()) / half).clamp(-1.0, 1.0);
    body.vx = offset * deflect_speed;
    body.vy = -body.vy.abs();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> ReflectBounds {
        ReflectBounds {
            left: 0.0,
            right: 1920.0,
            top: 60.0,
        }
    }

    #[test]
    fn integrates_velocity_over_time() {
        let mut body = KineticBody::new(300.0, -360.0, 600.0);
        let mut rect = Rect::new(960.0, 540.0, 16.0, 16.0);

        body.integrate(&mut rect, 0.1, &bounds());
        assert_eq!(rect.x, 990.0);
        assert_eq!(rect.y, 504.0);
    }

    #[test]
    fn left_edge_reflects_and_clamps() {
        let mut body = KineticBody::new(-300.0, 100.0, 600.0);
        let mut rect = Rect::new(10.0, 500.0, 16.0, 16.0);

        body.integrate(&mut rect, 0.1, &bounds());
        assert_eq!(rect.left(), 0.0, "Box must be clamped back onto the edge");
        assert_eq!(body.vx, 300.0, "Velocity must point back into the field");
    }

    #[test]
    fn right_edge_reflects_and_clamps() {
        let mut body = KineticBody::new(300.0, 100.0, 600.0);
        let mut rect = Rect::new(1900.0, 500.0, 16.0, 16.0);

        body.integrate(&mut rect, 0.1, &bounds());
        assert_eq!(rect.right(), 1920.0);
        assert_eq!(body.vx, -300.0);
    }

    #[test]
    fn top_edge_reflects_below_the_hud_line() {
        let mut body = KineticBody::new(0.0, -360.0, 600.0);
        let mut rect = Rect::new(960.0, 70.0, 16.0, 16.0);

        body.integrate(&mut rect, 0.1, &bounds());
        assert_eq!(rect.top(), 60.0);
        assert_eq!(body.vy, 360.0);
    }

    #[test]
    fn no_bottom_edge_lets_the_body_fall_out() {
        let mut body = KineticBody::new(0.0, 360.0, 600.0);
        let mut rect = Rect::new(960.0, 1070.0, 16.0, 16.0);

        body.integrate(&mut rect, 0.5, &bounds());
        assert!(rect.top() > 1080.0, "Nothing should stop a downward exit");
        assert_eq!(body.vy, 360.0);
    }

    #[test]
    fn speed_up_caps_each_component() {
        let mut body = KineticBody::new(500.0, -500.0, 600.0);
        body.speed_up(1.5);
        assert_eq!(body.vx, 600.0);
        assert_eq!(body.vy, -600.0);

        body.speed_up(1.5);
        assert_eq!(body.vx, 600.0, "Capped speed must stay capped");
    }

    #[test]
    fn center_hit_sends_the_ball_straight_up() {
        let paddle = Rect::new(900.0, 1010.0, 120.0, 20.0);
        let mut body = KineticBody::new(300.0, 360.0, 600.0);
        let rect = Rect::from_center(paddle.center_x(), paddle.top(), 16.0, 16.0);

        assert!(deflect_off_paddle(&mut body, &rect, &paddle, 360.0));
        assert_eq!(body.vx, 0.0, "Center contact must zero the horizontal speed");
        assert_eq!(body.vy, -360.0, "Vertical speed must flip upward");
    }

    #[test]
    fn edge_hit_deflects_at_full_angle() {
        let paddle = Rect::new(900.0, 1010.0, 120.0, 20.0);
        let mut body = KineticBody::new(0.0, 360.0, 600.0);
        let rect = Rect::from_center(paddle.right() - 1.0, paddle.top(), 16.0, 16.0);

        assert!(deflect_off_paddle(&mut body, &rect, &paddle, 360.0));
        assert!(body.vx > 350.0, "Near-edge contact should deflect hard, got {}", body.vx);
        assert_eq!(body.vy, -360.0);
    }

    #[test]
    fn rising_ball_passes_through_the_paddle() {
        let paddle = Rect::new(900.0, 1010.0, 120.0, 20.0);
        let mut body = KineticBody::new(100.0, -360.0, 600.0);
        let rect = Rect::from_center(paddle.center_x(), paddle.top(), 16.0, 16.0);

        assert!(!deflect_off_paddle(&mut body, &rect, &paddle, 360.0));
        assert_eq!(body.vx, 100.0);
        assert_eq!(body.vy, -360.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn repeated_speed_ups_never_exceed_the_cap(
                vx in -400.0f32..400.0,
                vy in -400.0f32..400.0,
                boosts in 0usize..10,
            ) {
                let mut body = KineticBody::new(vx, vy, 600.0);
                let vx_before = body.vx.abs();
                for _ in 0..boosts {
                    body.speed_up(1.5);
                }
                prop_assert!(body.vx.abs() <= 600.0);
                prop_assert!(body.vy.abs() <= 600.0);
                prop_assert!(
                    body.vx.abs() >= vx_before.min(600.0),
                    "Boosting must never slow a component: {} -> {}",
                    vx_before,
                    body.vx.abs()
                );
            }

            #[test]
            fn body_never_rests_outside_the_side_bounds(
                x in 0.0f32..1904.0,
                y in 100.0f32..900.0,
                vx in -600.0f32..600.0,
                vy in -600.0f32..600.0,
                dt in 0.0f32..0.07,
            ) {
                let bounds = bounds();
                let mut body = KineticBody::new(vx, vy, 600.0);
                let mut rect = Rect::new(x, y, 16.0, 16.0);

                body.integrate(&mut rect, dt, &bounds);
                prop_assert!(rect.left() >= bounds.left);
                prop_assert!(rect.right() <= bounds.right);
                prop_assert!(rect.top() >= bounds.top);
            }

            #[test]
            fn deflection_offset_stays_within_unit_range(
                ball_cx in 700.0f32..1200.0,
            ) {
                let paddle = Rect::new(900.0, 1010.0, 120.0, 20.0);
                let mut body = KineticBody::new(50.0, 360.0, 600.0);
                let rect = Rect::from_center(ball_cx, paddle.top(), 16.0, 16.0);

                if deflect_off_paddle(&mut body, &rect, &paddle, 360.0) {
                    prop_assert!(body.vx.abs() <= 360.0, "Deflection {} out of range", body.vx);
                    prop_assert!(body.vy < 0.0);
                }
            }
        }
    }
}
