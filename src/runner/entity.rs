//! Obstacles, coins and track lines, and the arena that owns them.
//!
//! Every entity carries a [`Traversal`]: the clock time it was spawned and
//! how long it takes to travel from the horizon (progress 0) to the camera
//! (progress 1). Progress is derived from the session clock on demand rather
//! than stored, so there is nothing to animate and nothing to unregister.

use super::lane::Lane;
use rand::Rng;
use std::collections::BTreeMap;

/// Identifier of a live entity, unique within its arena.
pub type EntityId = u64;

/// Spawn time and duration of an entity's trip down the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traversal {
    pub spawned_at_ms: u64,
    pub duration_ms: u64,
}

impl Traversal {
    pub fn new(spawned_at_ms: u64, duration_ms: u64) -> Self {
        Self {
            spawned_at_ms,
            duration_ms: duration_ms.max(1),
        }
    }

    /// Normalized progress at `now_ms`, clamped to `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.spawned_at_ms);
        (elapsed as f64 / self.duration_ms as f64).min(1.0)
    }

    /// True once the traversal has run its full duration.
    pub fn is_complete(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.spawned_at_ms) >= self.duration_ms
    }
}

/// Obstacle variants. Both end the run on contact; they only differ in
/// how they are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Train,
    Barrier,
}

impl ObstacleKind {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen::<bool>() {
            Self::Train
        } else {
            Self::Barrier
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Barrier => "barrier",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub lane: Lane,
    pub kind: ObstacleKind,
    pub traversal: Traversal,
    /// Set once this obstacle has ended the run; the session then removes it.
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub lane: Lane,
    pub traversal: Traversal,
    /// Set once the player has picked this coin up; the session then removes
    /// it from the arena.
    pub collected: bool,
}

/// Decorative cross-tie scrolling down the track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLine {
    pub traversal: Traversal,
}

/// Anything with a traversal can be retired by the arena.
pub trait Traversing {
    fn traversal(&self) -> &Traversal;

    fn progress(&self, now_ms: u64) -> f64 {
        self.traversal().progress(now_ms)
    }
}

impl Traversing for Obstacle {
    fn traversal(&self) -> &Traversal {
        &self.traversal
    }
}

impl Traversing for Coin {
    fn traversal(&self) -> &Traversal {
        &self.traversal
    }
}

impl Traversing for TrackLine {
    fn traversal(&self) -> &Traversal {
        &self.traversal
    }
}

/// Ordered store of live entities keyed by a monotonically increasing id.
///
/// Ids are never reused while the arena lives; [`EntityArena::clear`]
/// resets the counter along with the contents.
#[derive(Debug, Clone)]
pub struct EntityArena<T> {
    entities: BTreeMap<EntityId, T>,
    next_id: EntityId,
}

impl<T> Default for EntityArena<T> {
    fn default() -> Self {
        Self {
            entities: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<T> EntityArena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `entity` under the next id and return that id.
    pub fn insert(&mut self, entity: T) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.insert(id, entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.entities.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entities.iter().map(|(&id, e)| (id, e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entities.iter_mut().map(|(&id, e)| (id, e))
    }

    /// Id the next insert will receive.
    pub fn next_id(&self) -> EntityId {
        self.next_id
    }

    /// Drop every entity and restart ids from zero.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.next_id = 0;
    }
}

impl<T: Traversing> EntityArena<T> {
    /// Remove every entity whose traversal has completed at `now_ms`.
    /// Returns the ids that were removed.
    pub fn retire_completed(&mut self, now_ms: u64) -> Vec<EntityId> {
        let done: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|(_, e)| e.traversal().is_complete(now_ms))
            .map(|(&id, _)| id)
            .collect();
        for id in &done {
            self.entities.remove(id);
        }
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(spawned_at_ms: u64, duration_ms: u64) -> TrackLine {
        TrackLine {
            traversal: Traversal::new(spawned_at_ms, duration_ms),
        }
    }

    #[test]
    fn test_progress_from_elapsed_time() {
        let t = Traversal::new(1000, 2000);
        assert!((t.progress(1000) - 0.0).abs() < f64::EPSILON);
        assert!((t.progress(2000) - 0.5).abs() < f64::EPSILON);
        assert!((t.progress(2600) - 0.8).abs() < 1e-9);
        assert!((t.progress(5000) - 1.0).abs() < f64::EPSILON);
        // Before spawn reads as zero
        assert!((t.progress(500) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_duration_is_clamped() {
        let t = Traversal::new(0, 0);
        assert_eq!(t.duration_ms, 1);
        assert!(t.is_complete(1));
    }

    #[test]
    fn test_ids_increase_and_are_not_reused() {
        let mut arena = EntityArena::new();
        let a = arena.insert(line(0, 100));
        let b = arena.insert(line(0, 100));
        assert_eq!((a, b), (0, 1));

        arena.remove(a);
        let c = arena.insert(line(0, 100));
        assert_eq!(c, 2, "removed ids must not be handed out again");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_retire_completed() {
        let mut arena = EntityArena::new();
        let short = arena.insert(line(0, 100));
        let long = arena.insert(line(0, 500));

        assert!(arena.retire_completed(99).is_empty());
        assert_eq!(arena.retire_completed(100), vec![short]);
        assert!(!arena.contains(short));
        assert!(arena.contains(long));
    }

    #[test]
    fn test_clear_resets_ids() {
        let mut arena = EntityArena::new();
        arena.insert(line(0, 100));
        arena.insert(line(0, 100));
        arena.clear();

        assert!(arena.is_empty());
        assert_eq!(arena.next_id(), 0);
        assert_eq!(arena.insert(line(0, 100)), 0);
    }

    #[test]
    fn test_iter_in_spawn_order() {
        let mut arena = EntityArena::new();
        for i in 0..5 {
            arena.insert(line(i * 10, 100));
        }
        let ids: Vec<EntityId> = arena.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}
