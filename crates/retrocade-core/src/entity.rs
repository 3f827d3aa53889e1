use serde::{Deserialize, Serialize};

use crate::rect::Rect;

/// Pellet flavor in the maze game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PelletKind {
    Normal,
    Power,
}

impl PelletKind {
    pub fn points(self) -> u32 {
        match self {
            PelletKind::Normal => 10,
            PelletKind::Power => 50,
        }
    }
}

/// Which side fired a bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Alien,
}

/// Formation member tier; decides color and score value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlienKind {
    Red,
    Yellow,
    Green,
}

impl AlienKind {
    pub fn points(self) -> u32 {
        match self {
            AlienKind::Red => 30,
            AlienKind::Yellow => 20,
            AlienKind::Green => 10,
        }
    }
}

/// Power-up kinds dropped by destroyed bricks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtraBalls,
    MirrorClone,
    WidePaddle,
    FastBalls,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::ExtraBalls,
        PowerUpKind::MirrorClone,
        PowerUpKind::WidePaddle,
        PowerUpKind::FastBalls,
    ];
}

/// Variant tag carried by every entity; the renderer picks glyph and color
/// from the tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Wall,
    Pellet(PelletKind),
    Actor,
    Ghost,
    Paddle,
    Ball,
    Brick,
    PowerUp(PowerUpKind),
    Bullet(BulletOwner),
    AlienFormationMember(AlienKind),
    Bunker,
}

/// One simulated object: a tag plus its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub rect: Rect,
}

/// Stable handle to an arena slot: generation in the high 32 bits, slot
/// index in the low 32. A handle that outlived its despawn resolves to
/// nothing instead of aliasing whatever reused the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    fn new(index: u32, generation: u32) -> Self {
        Self((u64::from(generation) << 32) | u64::from(index))
    }

    pub fn index(self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }

    pub fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Generational entity storage. Despawning bumps the slot's generation and
/// recycles the index through a free list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, kind: EntityKind, rect: Rect) -> EntityId {
        let entity = Entity { kind, rect };
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            EntityId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                entity: Some(entity),
            });
            EntityId::new(index, 0)
        }
    }

    /// Remove an entity. Returns false for stale or unknown handles.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index() as usize) else {
            return false;
        };
        if slot.generation != id.generation() || slot.entity.is_none() {
            return false;
        }
        slot.entity = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.live -= 1;
        true
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.entity.as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.entity.as_mut()
    }

    pub fn rect(&self, id: EntityId) -> Option<Rect> {
        self.get(id).map(|e| e.rect)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Despawn every live entity. Generations advance as usual, so handles
    /// held across a clear stay stale.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entity.is_some() {
                slot.entity = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.live = 0;
    }

    /// Live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entity
                .as_ref()
                .map(|e| (EntityId::new(index as u32, slot.generation), e))
        })
    }

    /// Draw-ready copies of every live entity, in slot order.
    pub fn sprites(&self) -> Vec<Sprite> {
        self.iter()
            .map(|(_, e)| Sprite {
                kind: e.kind,
                rect: e.rect,
            })
            .collect()
    }
}

/// One draw-ready entity handed to the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: EntityKind,
    pub rect: Rect,
}

/// Ordered membership set for one logical group (walls, pellets, bricks).
/// Iteration follows insertion order, which the collision sweeps rely on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    ids: Vec<EntityId>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: EntityId) {
        self.ids.push(id);
    }

    pub fn remove(&mut self, id: EntityId) {
        self.ids.retain(|&member| member != id);
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Despawn every member and empty the set.
    pub fn despawn_all(&mut self, arena: &mut Arena) {
        for &id in &self.ids {
            arena.despawn(id);
        }
        self.ids.clear();
    }

    /// Current bounding boxes of the live members, in insertion order.
    pub fn rects(&self, arena: &Arena) -> Vec<Rect> {
        self.ids.iter().filter_map(|&id| arena.rect(id)).collect()
    }
}
