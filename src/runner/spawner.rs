//! Entity spawning.
//!
//! Spawns are plain inserts into the session's arenas; the random variants
//! draw lane and kind from the caller's RNG so a seeded source reproduces a
//! run exactly.

use super::entity::{
    Coin, EntityArena, EntityId, Obstacle, ObstacleKind, TrackLine, Traversal,
};
use super::lane::Lane;
use rand::Rng;

/// Spawn an obstacle with a random lane and kind.
pub fn spawn_random_obstacle<R: Rng + ?Sized>(
    arena: &mut EntityArena<Obstacle>,
    rng: &mut R,
    now_ms: u64,
    duration_ms: u64,
) -> EntityId {
    let lane = Lane::random(rng);
    let kind = ObstacleKind::random(rng);
    spawn_obstacle(arena, lane, kind, now_ms, duration_ms)
}

pub fn spawn_obstacle(
    arena: &mut EntityArena<Obstacle>,
    lane: Lane,
    kind: ObstacleKind,
    now_ms: u64,
    duration_ms: u64,
) -> EntityId {
    arena.insert(Obstacle {
        lane,
        kind,
        traversal: Traversal::new(now_ms, duration_ms),
        checked: false,
    })
}

/// Spawn a coin in a random lane.
pub fn spawn_random_coin<R: Rng + ?Sized>(
    arena: &mut EntityArena<Coin>,
    rng: &mut R,
    now_ms: u64,
    duration_ms: u64,
) -> EntityId {
    let lane = Lane::random(rng);
    spawn_coin(arena, lane, now_ms, duration_ms)
}

pub fn spawn_coin(
    arena: &mut EntityArena<Coin>,
    lane: Lane,
    now_ms: u64,
    duration_ms: u64,
) -> EntityId {
    arena.insert(Coin {
        lane,
        traversal: Traversal::new(now_ms, duration_ms),
        collected: false,
    })
}

pub fn spawn_track_line(
    arena: &mut EntityArena<TrackLine>,
    now_ms: u64,
    duration_ms: u64,
) -> EntityId {
    arena.insert(TrackLine {
        traversal: Traversal::new(now_ms, duration_ms),
    })
}
