use serde::{Deserialize, Serialize};

use crate::entity::{Arena, EntityId, EntityKind, Group};
use crate::rect::Rect;

/// Removal policy for one collision sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPolicy {
    pub remove_source: bool,
    pub remove_target: bool,
}

impl SweepPolicy {
    pub const KEEP_BOTH: SweepPolicy = SweepPolicy {
        remove_source: false,
        remove_target: false,
    };
    pub const REMOVE_BOTH: SweepPolicy = SweepPolicy {
        remove_source: true,
        remove_target: true,
    };
    pub const REMOVE_TARGET: SweepPolicy = SweepPolicy {
        remove_source: false,
        remove_target: true,
    };
}

/// One matched pair from a sweep. Rects are captured before any removal so
/// callers can score by position or spawn drops where the target stood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub source: EntityId,
    pub source_kind: EntityKind,
    pub source_rect: Rect,
    pub target: EntityId,
    pub target_kind: EntityKind,
    pub target_rect: Rect,
}

/// Sweep every source against every still-live target.
///
/// Sources are visited in group insertion order. With `remove_target` set, a
/// matched target despawns immediately, so later sources cannot match it a
/// second time. With `remove_source` set, a source that matched anything
/// despawns after its own scan. Degenerate boxes never match.
pub fn group_vs_group(
    arena: &mut Arena,
    sources: &mut Group,
    targets: &mut Group,
    policy: SweepPolicy,
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let source_ids: Vec<EntityId> = sources.ids().to_vec();
    for source in source_ids {
        let hit_any = sweep_one(arena, source, targets, policy.remove_target, &mut contacts);
        if hit_any && policy.remove_source {
            arena.despawn(source);
            sources.remove(source);
        }
    }
    contacts
}

/// Sweep a single entity against every still-live target.
pub fn entity_vs_group(
    arena: &mut Arena,
    source: EntityId,
    targets: &mut Group,
    remove_targets: bool,
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    sweep_one(arena, source, targets, remove_targets, &mut contacts);
    contacts
}

fn sweep_one(
    arena: &mut Arena,
    source: EntityId,
    targets: &mut Group,
    remove_targets: bool,
    contacts: &mut Vec<Contact>,
) -> bool {
    let Some(src) = arena.get(source).copied() else {
        return false;
    };
    let mut hit_any = false;
    let target_ids: Vec<EntityId> = targets.ids().to_vec();
    for target in target_ids {
        if target == source {
            continue;
        }
        let Some(tgt) = arena.get(target).copied() else {
            continue;
        };
        if !src.rect.intersects(&tgt.rect) {
            continue;
        }
        contacts.push(Contact {
            source,
            source_kind: src.kind,
            source_rect: src.rect,
            target,
            target_kind: tgt.kind,
            target_rect: tgt.rect,
        });
        hit_any = true;
        if remove_targets {
            arena.despawn(target);
            targets.remove(target);
        }
    }
    hit_any
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{BulletOwner, PelletKind};

    fn spawn_at(arena: &mut Arena, group: &mut Group, kind: EntityKind, x: f32, y: f32) -> EntityId {
        let id = arena.spawn(kind, Rect::new(x, y, 10.0, 10.0));
        group.insert(id);
        id
    }

    #[test]
    fn removed_target_cannot_match_twice() {
        let mut arena = Arena::new();
        let mut bullets = Group::new();
        let mut aliens = Group::new();

        // Two bullets stacked on one alien.
        spawn_at(&mut arena, &mut bullets, EntityKind::Bullet(BulletOwner::Player), 0.0, 0.0);
        spawn_at(&mut arena, &mut bullets, EntityKind::Bullet(BulletOwner::Player), 2.0, 2.0);
        spawn_at(&mut arena, &mut aliens, EntityKind::AlienFormationMember(crate::entity::AlienKind::Red), 0.0, 0.0);

        let contacts = group_vs_group(&mut arena, &mut bullets, &mut aliens, SweepPolicy::REMOVE_BOTH);
        assert_eq!(contacts.len(), 1, "One alien must score exactly once");
        assert!(aliens.is_empty());
        assert_eq!(bullets.len(), 1, "Second bullet flew on past the gone alien");
    }

    #[test]
    fn sources_are_swept_in_insertion_order() {
        let mut arena = Arena::new();
        let mut sources = Group::new();
        let mut targets = Group::new();

        let first = spawn_at(&mut arena, &mut sources, EntityKind::Ball, 0.0, 0.0);
        let second = spawn_at(&mut arena, &mut sources, EntityKind::Ball, 100.0, 0.0);
        spawn_at(&mut arena, &mut targets, EntityKind::Brick, 0.0, 0.0);
        spawn_at(&mut arena, &mut targets, EntityKind::Brick, 100.0, 0.0);

        let contacts = group_vs_group(&mut arena, &mut sources, &mut targets, SweepPolicy::REMOVE_TARGET);
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].source, first);
        assert_eq!(contacts[1].source, second);
    }

    #[test]
    fn keep_both_reports_without_removing() {
        let mut arena = Arena::new();
        let mut ghosts = Group::new();
        let mut actors = Group::new();

        spawn_at(&mut arena, &mut ghosts, EntityKind::Ghost, 0.0, 0.0);
        spawn_at(&mut arena, &mut actors, EntityKind::Actor, 5.0, 5.0);

        let contacts = group_vs_group(&mut arena, &mut ghosts, &mut actors, SweepPolicy::KEEP_BOTH);
        assert_eq!(contacts.len(), 1);
        assert_eq!(ghosts.len(), 1);
        assert_eq!(actors.len(), 1);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn remove_source_despawns_after_its_scan() {
        let mut arena = Arena::new();
        let mut bullets = Group::new();
        let mut blocks = Group::new();

        let bullet = spawn_at(&mut arena, &mut bullets, EntityKind::Bullet(BulletOwner::Alien), 0.0, 0.0);
        // One bullet overlapping two bunker blocks: both blocks go, bullet goes once.
        spawn_at(&mut arena, &mut blocks, EntityKind::Bunker, 0.0, 0.0);
        spawn_at(&mut arena, &mut blocks, EntityKind::Bunker, 5.0, 0.0);

        let contacts = group_vs_group(&mut arena, &mut bullets, &mut blocks, SweepPolicy::REMOVE_BOTH);
        assert_eq!(contacts.len(), 2);
        assert!(bullets.is_empty());
        assert!(blocks.is_empty());
        assert!(!arena.contains(bullet));
    }

    #[test]
    fn contact_captures_rects_before_removal() {
        let mut arena = Arena::new();
        let mut balls = Group::new();
        let mut bricks = Group::new();

        let ball = spawn_at(&mut arena, &mut balls, EntityKind::Ball, 0.0, 0.0);
        if let Some(entity) = arena.get_mut(ball) {
            entity.rect = Rect::new(78.0, 98.0, 16.0, 16.0);
        }
        let brick = arena.spawn(EntityKind::Brick, Rect::new(80.0, 100.0, 70.0, 25.0));
        bricks.insert(brick);

        let contacts = entity_vs_group(&mut arena, ball, &mut bricks, true);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].target_rect.x, 80.0);
        assert_eq!(contacts[0].target_rect.y, 100.0);
        assert!(!arena.contains(brick));
    }

    #[test]
    fn entity_vs_group_with_stale_source_matches_nothing() {
        let mut arena = Arena::new();
        let mut pellets = Group::new();
        let actor = arena.spawn(EntityKind::Actor, Rect::new(0.0, 0.0, 30.0, 30.0));
        spawn_at(&mut arena, &mut pellets, EntityKind::Pellet(PelletKind::Normal), 0.0, 0.0);
        arena.despawn(actor);

        let contacts = entity_vs_group(&mut arena, actor, &mut pellets, true);
        assert!(contacts.is_empty());
        assert_eq!(pellets.len(), 1);
    }

    #[test]
    fn source_never_matches_itself() {
        let mut arena = Arena::new();
        let mut group = Group::new();
        let id = spawn_at(&mut arena, &mut group, EntityKind::Ghost, 0.0, 0.0);

        let contacts = entity_vs_group(&mut arena, id, &mut group, false);
        assert!(contacts.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_target_is_matched_at_most_once(
                sources in proptest::collection::vec((0.0f32..100.0, 0.0f32..100.0), 1..10),
                targets in proptest::collection::vec((0.0f32..100.0, 0.0f32..100.0), 1..10),
            ) {
                let mut arena = Arena::new();
                let mut source_group = Group::new();
                let mut target_group = Group::new();
                for &(x, y) in &sources {
                    source_group.insert(arena.spawn(EntityKind::Ball, Rect::new(x, y, 20.0, 20.0)));
                }
                for &(x, y) in &targets {
                    target_group.insert(arena.spawn(EntityKind::Brick, Rect::new(x, y, 20.0, 20.0)));
                }

                let contacts = group_vs_group(
                    &mut arena,
                    &mut source_group,
                    &mut target_group,
                    SweepPolicy::REMOVE_TARGET,
                );
                let mut seen: Vec<EntityId> = contacts.iter().map(|c| c.target).collect();
                let before = seen.len();
                seen.sort();
                seen.dedup();
                prop_assert_eq!(seen.len(), before, "A removed target matched more than once");
                prop_assert_eq!(target_group.len() + before, targets.len());
            }
        }
    }
}
