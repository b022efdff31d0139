//! Pooled entity storage: fixed-capacity slot arena with a free-index stack.
//!
//! High-churn objects (hazards scrolling past, coin-burst particles) are
//! never reallocated: a released slot goes back on the free stack and the
//! next spawn of any kind reuses it. Per-kind active caps bound the total
//! population; a spawn past its cap is dropped silently rather than queued.

use super::entity::{Entity, KindTag};

/// Active-count caps per kind. Spawn requests beyond a cap are dropped.
pub const MAX_PLAYERS: usize = 1;
pub const MAX_HAZARDS: usize = 15;
pub const MAX_COLLECTIBLES: usize = 10;
pub const MAX_PARTICLES: usize = 30;

const CAPACITY: usize = MAX_PLAYERS + MAX_HAZARDS + MAX_COLLECTIBLES + MAX_PARTICLES;

impl KindTag {
    /// The active cap for this kind.
    pub fn cap(self) -> usize {
        match self {
            KindTag::Player => MAX_PLAYERS,
            KindTag::Hazard => MAX_HAZARDS,
            KindTag::Collectible => MAX_COLLECTIBLES,
            KindTag::Particle => MAX_PARTICLES,
        }
    }
}

/// Handle to a live slot. Stale handles (released slots) resolve to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(usize);

/// The arena. Owns every live [`Entity`]; callers hold only [`EntityId`]s.
pub struct EntityStore {
    slots: Box<[Option<Entity>]>,
    free: Vec<usize>,
    active: [usize; 4],
}

impl EntityStore {
    pub fn new() -> Self {
        let slots: Vec<Option<Entity>> = (0..CAPACITY).map(|_| None).collect();
        Self {
            slots: slots.into_boxed_slice(),
            free: (0..CAPACITY).rev().collect(),
            active: [0; 4],
        }
    }

    /// Place an entity into a free slot. Returns `None` when the kind's cap
    /// is reached (the spawn is dropped, by design not an error).
    pub fn spawn(&mut self, entity: Entity) -> Option<EntityId> {
        let tag = entity.kind.tag();
        if self.active[tag.index()] >= tag.cap() {
            return None;
        }
        let index = self.free.pop()?;
        debug_assert!(self.slots[index].is_none(), "free slot already occupied");
        self.slots[index] = Some(entity);
        self.active[tag.index()] += 1;
        Some(EntityId(index))
    }

    /// Clear the slot back to the pool default and return its index to the
    /// free stack. Releasing an already-free id is a no-op; returns whether
    /// an entity was actually released.
    pub fn release(&mut self, id: EntityId) -> bool {
        match self.slots[id.0].take() {
            Some(entity) => {
                self.active[entity.kind.tag().index()] -= 1;
                self.free.push(id.0);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots[id.0].as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots[id.0].as_mut()
    }

    /// Number of live entities of one kind.
    pub fn active_count(&self, tag: KindTag) -> usize {
        self.active[tag.index()]
    }

    /// Total live entities across all kinds.
    pub fn len(&self) -> usize {
        self.active.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of all live entities of one kind. Collected up front so callers
    /// can mutate or release while walking the list.
    pub fn ids_of(&self, tag: KindTag) -> Vec<EntityId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Some(e) if e.kind.tag() == tag => Some(EntityId(i)),
                _ => None,
            })
            .collect()
    }

    /// Visit every live entity of one kind mutably.
    pub fn for_each_active(&mut self, tag: KindTag, mut f: impl FnMut(EntityId, &mut Entity)) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(e) = slot {
                if e.kind.tag() == tag {
                    f(EntityId(i), e);
                }
            }
        }
    }

    /// Release every entity of one kind that fails the predicate.
    pub fn retain(&mut self, tag: KindTag, mut keep: impl FnMut(&Entity) -> bool) {
        for id in self.ids_of(tag) {
            let dead = match self.get(id) {
                Some(e) => !keep(e),
                None => false,
            };
            if dead {
                self.release(id);
            }
        }
    }

    /// Release everything.
    pub fn clear(&mut self) {
        for i in 0..self.slots.len() {
            if self.slots[i].is_some() {
                self.release(EntityId(i));
            }
        }
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("live", &self.len())
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::EntityKind;

    fn hazard() -> Entity {
        let mut e = Entity::new(10.0, 20.0, 60.0, 40.0, EntityKind::Hazard { style: 1 });
        e.vy = 5.0;
        e
    }

    fn particle() -> Entity {
        Entity::new(
            0.0,
            0.0,
            4.0,
            4.0,
            EntityKind::Particle {
                life: 60,
                max_life: 60,
            },
        )
    }

    #[test]
    fn test_spawn_and_get() {
        let mut store = EntityStore::new();
        let id = store.spawn(hazard()).expect("spawn should succeed");
        let e = store.get(id).unwrap();
        assert!((e.x - 10.0).abs() < f64::EPSILON);
        assert_eq!(store.active_count(KindTag::Hazard), 1);
    }

    #[test]
    fn test_release_resets_slot_to_pool_default() {
        let mut store = EntityStore::new();
        let id = store.spawn(hazard()).unwrap();
        assert!(store.release(id));
        // The slot is back to its pool-reset state: empty, nothing readable.
        assert!(store.get(id).is_none());
        assert_eq!(store.active_count(KindTag::Hazard), 0);
    }

    #[test]
    fn test_double_release_is_noop() {
        let mut store = EntityStore::new();
        let id = store.spawn(hazard()).unwrap();
        assert!(store.release(id));
        assert!(!store.release(id));
        assert_eq!(store.len(), 0);
        // A double release must not corrupt the free stack: spawning to the
        // hazard cap still yields exactly MAX_HAZARDS live entities.
        for _ in 0..MAX_HAZARDS {
            assert!(store.spawn(hazard()).is_some());
        }
        assert_eq!(store.active_count(KindTag::Hazard), MAX_HAZARDS);
    }

    #[test]
    fn test_reused_slot_carries_no_stale_state() {
        let mut store = EntityStore::new();
        let id = store.spawn(hazard()).unwrap();
        store.get_mut(id).unwrap().vy = 99.0;
        store.release(id);

        let id2 = store.spawn(particle()).unwrap();
        let e = store.get(id2).unwrap();
        assert_eq!(e.kind.tag(), KindTag::Particle);
        assert!((e.vy - 0.0).abs() < f64::EPSILON, "no stale velocity");
    }

    #[test]
    fn test_hazard_cap_drops_sixteenth_spawn() {
        let mut store = EntityStore::new();
        for _ in 0..MAX_HAZARDS {
            assert!(store.spawn(hazard()).is_some());
        }
        assert!(store.spawn(hazard()).is_none(), "16th spawn must be dropped");
        assert_eq!(store.active_count(KindTag::Hazard), MAX_HAZARDS);
    }

    #[test]
    fn test_caps_are_per_kind() {
        let mut store = EntityStore::new();
        for _ in 0..MAX_HAZARDS {
            store.spawn(hazard());
        }
        // Hazards at cap must not block particles.
        assert!(store.spawn(particle()).is_some());
    }

    #[test]
    fn test_particle_cap() {
        let mut store = EntityStore::new();
        for _ in 0..MAX_PARTICLES {
            assert!(store.spawn(particle()).is_some());
        }
        assert!(store.spawn(particle()).is_none());
    }

    #[test]
    fn test_release_makes_room_under_cap() {
        let mut store = EntityStore::new();
        let mut ids = Vec::new();
        for _ in 0..MAX_HAZARDS {
            ids.push(store.spawn(hazard()).unwrap());
        }
        store.release(ids[0]);
        assert!(store.spawn(hazard()).is_some());
    }

    #[test]
    fn test_ids_of_filters_by_kind() {
        let mut store = EntityStore::new();
        store.spawn(hazard());
        store.spawn(hazard());
        store.spawn(particle());
        assert_eq!(store.ids_of(KindTag::Hazard).len(), 2);
        assert_eq!(store.ids_of(KindTag::Particle).len(), 1);
        assert_eq!(store.ids_of(KindTag::Collectible).len(), 0);
    }

    #[test]
    fn test_for_each_active_mutates() {
        let mut store = EntityStore::new();
        store.spawn(hazard());
        store.spawn(hazard());
        store.for_each_active(KindTag::Hazard, |_, e| e.y += 5.0);
        for id in store.ids_of(KindTag::Hazard) {
            assert!((store.get(id).unwrap().y - 25.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_retain_releases_failures() {
        let mut store = EntityStore::new();
        let keep = store.spawn(hazard()).unwrap();
        let drop = store.spawn(hazard()).unwrap();
        store.get_mut(drop).unwrap().y = 700.0;

        store.retain(KindTag::Hazard, |e| e.y < 600.0);

        assert!(store.get(keep).is_some());
        assert!(store.get(drop).is_none());
        assert_eq!(store.active_count(KindTag::Hazard), 1);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut store = EntityStore::new();
        store.spawn(hazard());
        store.spawn(particle());
        store.clear();
        assert!(store.is_empty());
        // Full capacity is available again.
        for _ in 0..MAX_HAZARDS {
            assert!(store.spawn(hazard()).is_some());
        }
    }
}
