//! Collision evaluation.
//!
//! There is no geometry: an obstacle or coin "reaches" the player when its
//! progress is inside a configured window, which stands in for the player's
//! fixed depth on screen. The `checked`/`collected` markers make every
//! evaluation idempotent, so repeated ticks never double-apply an effect.

use super::config::RunnerConfig;
use super::entity::{Coin, EntityArena, EntityId, Obstacle, Traversing};
use super::lane::Lane;

/// Player state the evaluator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerProbe {
    pub lane: Lane,
    pub jumping: bool,
}

/// What one evaluation found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Obstacle that ended the run, if any.
    pub hit: Option<EntityId>,
    /// Coins picked up this tick, in spawn order.
    pub collected: Vec<EntityId>,
}

/// Evaluate every live obstacle and coin at `now_ms`.
///
/// Obstacles are checked first. A hit freezes the run, so no coins are
/// collected on the same tick and later obstacles are left untouched.
pub fn evaluate(
    obstacles: &mut EntityArena<Obstacle>,
    coins: &mut EntityArena<Coin>,
    player: PlayerProbe,
    game_over: bool,
    now_ms: u64,
    config: &RunnerConfig,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    if game_over {
        return report;
    }

    if !player.jumping {
        for (id, obstacle) in obstacles.iter_mut() {
            if obstacle.checked || obstacle.lane != player.lane {
                continue;
            }
            if config.obstacle_window.contains(obstacle.progress(now_ms)) {
                obstacle.checked = true;
                report.hit = Some(id);
                return report;
            }
        }
    }

    for (id, coin) in coins.iter_mut() {
        if coin.collected || coin.lane != player.lane {
            continue;
        }
        if config.coin_window.contains(coin.progress(now_ms)) {
            coin.collected = true;
            report.collected.push(id);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::entity::ObstacleKind;
    use crate::runner::spawner::{spawn_coin, spawn_obstacle};

    const DURATION: u64 = 2000;

    fn probe(lane: Lane, jumping: bool) -> PlayerProbe {
        PlayerProbe { lane, jumping }
    }

    fn at_progress(p: f64) -> u64 {
        (DURATION as f64 * p) as u64
    }

    #[test]
    fn test_obstacle_in_window_same_lane_hits() {
        let cfg = RunnerConfig::default();
        let mut obstacles = EntityArena::new();
        let mut coins = EntityArena::new();
        let id = spawn_obstacle(&mut obstacles, Lane::Center, ObstacleKind::Train, 0, DURATION);

        let report = evaluate(
            &mut obstacles,
            &mut coins,
            probe(Lane::Center, false),
            false,
            at_progress(0.8),
            &cfg,
        );
        assert_eq!(report.hit, Some(id));
        assert!(obstacles.get(id).unwrap().checked);
    }

    #[test]
    fn test_obstacle_outside_window_misses() {
        let cfg = RunnerConfig::default();
        let mut obstacles = EntityArena::new();
        let mut coins = EntityArena::new();
        spawn_obstacle(&mut obstacles, Lane::Center, ObstacleKind::Barrier, 0, DURATION);

        for p in [0.5, 0.75, 0.95, 0.99] {
            let report = evaluate(
                &mut obstacles,
                &mut coins,
                probe(Lane::Center, false),
                false,
                at_progress(p),
                &cfg,
            );
            assert_eq!(report.hit, None, "progress {} should not hit", p);
        }
    }

    #[test]
    fn test_obstacle_other_lane_or_jumping_misses() {
        let cfg = RunnerConfig::default();
        let mut obstacles = EntityArena::new();
        let mut coins = EntityArena::new();
        spawn_obstacle(&mut obstacles, Lane::Left, ObstacleKind::Train, 0, DURATION);

        let now = at_progress(0.8);
        let report = evaluate(&mut obstacles, &mut coins, probe(Lane::Center, false), false, now, &cfg);
        assert_eq!(report.hit, None);

        let report = evaluate(&mut obstacles, &mut coins, probe(Lane::Left, true), false, now, &cfg);
        assert_eq!(report.hit, None, "jumping clears obstacles");
    }

    #[test]
    fn test_checked_obstacle_never_hits_twice() {
        let cfg = RunnerConfig::default();
        let mut obstacles = EntityArena::new();
        let mut coins = EntityArena::new();
        spawn_obstacle(&mut obstacles, Lane::Center, ObstacleKind::Train, 0, DURATION);

        let first = evaluate(&mut obstacles, &mut coins, probe(Lane::Center, false), false, at_progress(0.8), &cfg);
        let second = evaluate(&mut obstacles, &mut coins, probe(Lane::Center, false), false, at_progress(0.85), &cfg);
        assert!(first.hit.is_some());
        assert_eq!(second.hit, None);
    }

    #[test]
    fn test_nothing_evaluated_when_game_over() {
        let cfg = RunnerConfig::default();
        let mut obstacles = EntityArena::new();
        let mut coins = EntityArena::new();
        spawn_obstacle(&mut obstacles, Lane::Center, ObstacleKind::Train, 0, DURATION);
        let coin = spawn_coin(&mut coins, Lane::Center, 0, DURATION);

        let report = evaluate(&mut obstacles, &mut coins, probe(Lane::Center, false), true, at_progress(0.8), &cfg);
        assert_eq!(report, CollisionReport::default());
        assert!(!coins.get(coin).unwrap().collected);
    }

    #[test]
    fn test_coin_collected_once() {
        let cfg = RunnerConfig::default();
        let mut obstacles = EntityArena::new();
        let mut coins = EntityArena::new();
        let id = spawn_coin(&mut coins, Lane::Right, 0, DURATION);

        let first = evaluate(&mut obstacles, &mut coins, probe(Lane::Right, false), false, at_progress(0.75), &cfg);
        let second = evaluate(&mut obstacles, &mut coins, probe(Lane::Right, false), false, at_progress(0.8), &cfg);
        assert_eq!(first.collected, vec![id]);
        assert!(second.collected.is_empty());
        assert!(coins.get(id).unwrap().collected);
    }

    #[test]
    fn test_coin_collected_while_jumping() {
        let cfg = RunnerConfig::default();
        let mut obstacles = EntityArena::new();
        let mut coins = EntityArena::new();
        let id = spawn_coin(&mut coins, Lane::Left, 0, DURATION);

        let report = evaluate(&mut obstacles, &mut coins, probe(Lane::Left, true), false, at_progress(0.8), &cfg);
        assert_eq!(report.collected, vec![id]);
    }

    #[test]
    fn test_hit_freezes_coins_on_same_tick() {
        let cfg = RunnerConfig::default();
        let mut obstacles = EntityArena::new();
        let mut coins = EntityArena::new();
        spawn_obstacle(&mut obstacles, Lane::Center, ObstacleKind::Train, 0, DURATION);
        let coin = spawn_coin(&mut coins, Lane::Center, 0, DURATION);

        let report = evaluate(&mut obstacles, &mut coins, probe(Lane::Center, false), false, at_progress(0.8), &cfg);
        assert!(report.hit.is_some());
        assert!(report.collected.is_empty());
        assert!(!coins.get(coin).unwrap().collected);
    }
}
