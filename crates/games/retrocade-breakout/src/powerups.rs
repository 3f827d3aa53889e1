//! Falling power-up drops and the paddle effects they carry.

use retrocade_core::entity::{Arena, EntityId, EntityKind, Group, PowerUpKind};
use retrocade_core::rect::Rect;

use crate::config::BreakoutConfig;

/// Spawn a drop centered where `origin` (the destroyed brick) stood.
pub fn spawn(
    arena: &mut Arena,
    drops: &mut Group,
    origin: &Rect,
    kind: PowerUpKind,
    config: &BreakoutConfig,
) -> EntityId {
    let rect = Rect::from_center(
        origin.center_x(),
        origin.center_y(),
        config.drop_size,
        config.drop_size,
    );
    let id = arena.spawn(EntityKind::PowerUp(kind), rect);
    drops.insert(id);
    id
}

/// Advance every drop downward, despawning the ones that fell past the
/// bottom of the field uncaught.
pub fn fall(arena: &mut Arena, drops: &mut Group, dt: f32, config: &BreakoutConfig) {
    let ids: Vec<EntityId> = drops.ids().to_vec();
    for id in ids {
        let missed = match arena.get_mut(id) {
            Some(entity) => {
                entity.rect.y += config.drop_fall_speed * dt;
                entity.rect.top() > config.field_height
            }
            None => continue,
        };
        if missed {
            arena.despawn(id);
            drops.remove(id);
        }
    }
}

/// Grow the paddle about its center, capped at the configured maximum and
/// kept inside the field.
pub fn widen_paddle(paddle: &mut Rect, config: &BreakoutConfig) {
    let width = (paddle.w * config.paddle_grow_factor).min(config.paddle_max_width);
    let center = paddle.center_x();
    paddle.w = width;
    paddle.x = (center - width / 2.0).clamp(0.0, config.field_width - width);
}
