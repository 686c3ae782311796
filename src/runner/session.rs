//! Session controller: the state of one play-through and the fixed-step
//! loop that drives it.
//!
//! The host calls [`Session::advance`] with wall-clock deltas. Time is
//! accumulated and consumed in fixed steps (the GCD of every producer
//! period) so each producer fires exactly on its schedule. Within a step:
//!
//! 1. entities whose traversal completed are retired,
//! 2. a finished jump is settled,
//! 3. due producers fire in [`Producer::ALL`] order, the collision
//!    evaluator last.
//!
//! Reaching game over stops the loop on the spot; nothing advances until
//! [`Session::restart`].

use super::collision::{self, PlayerProbe};
use super::config::{RunnerConfig, MAX_FRAME_MS};
use super::entity::{Coin, EntityArena, EntityId, Obstacle, ObstacleKind, TrackLine};
use super::lane::Lane;
use super::player::{Player, Swipe, SwipeOutcome};
use super::spawner;
use super::timer::{PeriodicTimer, Producer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Multiplier at the start of a run, in tenths.
const BASE_MULTIPLIER_TENTHS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    GameOver,
}

/// Something that happened during [`Session::advance`]. The presentation
/// layer reacts to these instead of diffing session state.
#[derive(Debug, Clone, PartialEq)]
pub enum RunnerEvent {
    ScoreTick {
        gained: u64,
        score: u64,
    },
    SpeedUp {
        speed_ms: u64,
    },
    ObstacleSpawned {
        id: EntityId,
        lane: Lane,
        kind: ObstacleKind,
    },
    CoinSpawned {
        id: EntityId,
        lane: Lane,
    },
    CoinCollected {
        id: EntityId,
        coins: u64,
        multiplier: f64,
    },
    JumpLanded,
    GameOver {
        obstacle: EntityId,
        score: u64,
        coins: u64,
    },
}

#[derive(Debug, Clone)]
pub struct Session<R = StdRng> {
    config: RunnerConfig,
    state: SessionState,

    score: u64,
    coins: u64,
    multiplier_tenths: u32,
    speed_ms: u64,

    clock_ms: u64,
    accumulated_ms: u64,
    step_ms: u64,
    timers: [(Producer, PeriodicTimer); 5],

    obstacles: EntityArena<Obstacle>,
    coin_items: EntityArena<Coin>,
    track_lines: EntityArena<TrackLine>,
    player: Player,

    /// Number of restarts since creation.
    run: u32,
    rng: R,
}

impl Session<StdRng> {
    /// New session with a seeded standard RNG.
    pub fn new(config: RunnerConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// New session drawing spawn lanes and kinds from `rng`.
    pub fn with_rng(config: RunnerConfig, rng: R) -> Self {
        let step_ms = config.step_ms();
        let timers = Producer::ALL.map(|p| (p, PeriodicTimer::new(interval_for(&config, p))));
        let speed_ms = config.initial_speed_ms;

        info!(speed_ms, step_ms, "runner session started");

        Self {
            config,
            state: SessionState::Running,
            score: 0,
            coins: 0,
            multiplier_tenths: BASE_MULTIPLIER_TENTHS,
            speed_ms,
            clock_ms: 0,
            accumulated_ms: 0,
            step_ms,
            timers,
            obstacles: EntityArena::new(),
            coin_items: EntityArena::new(),
            track_lines: EntityArena::new(),
            player: Player::new(),
            run: 0,
            rng,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    /// Current multiplier, in `[1, max_multiplier]`.
    pub fn multiplier(&self) -> f64 {
        self.multiplier_tenths as f64 / 10.0
    }

    pub fn multiplier_tenths(&self) -> u32 {
        self.multiplier_tenths
    }

    /// Traversal duration given to newly spawned obstacles and coins.
    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    /// Simulated time since the run started.
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn run(&self) -> u32 {
        self.run
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &EntityArena<Obstacle> {
        &self.obstacles
    }

    pub fn coin_items(&self) -> &EntityArena<Coin> {
        &self.coin_items
    }

    pub fn track_lines(&self) -> &EntityArena<TrackLine> {
        &self.track_lines
    }

    /// Points the next score tick will add.
    pub fn score_per_tick(&self) -> u64 {
        self.config
            .base_score_per_tick
            .saturating_mul(self.multiplier_tenths as u64)
            / 10
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Apply a swipe at the current clock. Ignored once the run is over.
    pub fn handle_swipe(&mut self, swipe: Swipe) -> Option<SwipeOutcome> {
        if self.is_over() {
            return None;
        }
        let outcome = self.player.apply_swipe(swipe, self.clock_ms, &self.config);
        debug!(?swipe, ?outcome, clock_ms = self.clock_ms, "swipe");
        Some(outcome)
    }

    // ── Loop ────────────────────────────────────────────────────────

    /// Advance by `dt_ms` of wall time (clamped to [`MAX_FRAME_MS`]).
    pub fn advance(&mut self, dt_ms: u64) -> Vec<RunnerEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }

        self.accumulated_ms += dt_ms.min(MAX_FRAME_MS);
        while self.accumulated_ms >= self.step_ms {
            self.accumulated_ms -= self.step_ms;
            self.step(&mut events);
            if self.is_over() {
                self.accumulated_ms = 0;
                break;
            }
        }
        events
    }

    /// Advance by `total_ms`, in frame-sized chunks, stopping early at
    /// game over.
    pub fn run_for(&mut self, total_ms: u64) -> Vec<RunnerEvent> {
        let mut events = Vec::new();
        let mut remaining = total_ms;
        while remaining > 0 && !self.is_over() {
            let dt = remaining.min(MAX_FRAME_MS);
            events.extend(self.advance(dt));
            remaining -= dt;
        }
        events
    }

    fn step(&mut self, events: &mut Vec<RunnerEvent>) {
        self.clock_ms += self.step_ms;
        let now = self.clock_ms;

        self.obstacles.retire_completed(now);
        self.coin_items.retire_completed(now);
        self.track_lines.retire_completed(now);

        if self.player.settle(now, &self.config) {
            events.push(RunnerEvent::JumpLanded);
        }

        let mut due = [(Producer::Score, 0u32); 5];
        for (slot, (producer, timer)) in due.iter_mut().zip(self.timers.iter_mut()) {
            *slot = (*producer, timer.advance(self.step_ms));
        }

        for (producer, fired) in due {
            for _ in 0..fired {
                self.fire(producer, events);
                if self.is_over() {
                    return;
                }
            }
        }
    }

    fn fire(&mut self, producer: Producer, events: &mut Vec<RunnerEvent>) {
        let now = self.clock_ms;
        match producer {
            Producer::Score => self.tick_score(events),
            Producer::Obstacle => {
                let id =
                    spawner::spawn_random_obstacle(&mut self.obstacles, &mut self.rng, now, self.speed_ms);
                if let Some(o) = self.obstacles.get(id) {
                    debug!(id, lane = ?o.lane, kind = o.kind.name(), "obstacle spawned");
                    events.push(RunnerEvent::ObstacleSpawned {
                        id,
                        lane: o.lane,
                        kind: o.kind,
                    });
                }
            }
            Producer::Coin => {
                let id =
                    spawner::spawn_random_coin(&mut self.coin_items, &mut self.rng, now, self.speed_ms);
                if let Some(c) = self.coin_items.get(id) {
                    events.push(RunnerEvent::CoinSpawned { id, lane: c.lane });
                }
            }
            Producer::TrackLine => {
                let duration = self.config.track_line_duration(self.speed_ms);
                spawner::spawn_track_line(&mut self.track_lines, now, duration);
            }
            Producer::Collision => self.check_collisions(events),
        }
    }

    fn tick_score(&mut self, events: &mut Vec<RunnerEvent>) {
        let gained = self.score_per_tick();
        let before = self.score;
        self.score = self.score.saturating_add(gained);
        events.push(RunnerEvent::ScoreTick {
            gained,
            score: self.score,
        });

        let ramp = self.config.speed_ramp_score.max(1);
        let crossings = self.score / ramp - before / ramp;
        if crossings > 0 {
            let faster = self
                .speed_ms
                .saturating_sub(self.config.speed_step_ms.saturating_mul(crossings))
                .max(self.config.min_speed_ms);
            if faster != self.speed_ms {
                self.speed_ms = faster;
                debug!(score = self.score, speed_ms = faster, "speed up");
                events.push(RunnerEvent::SpeedUp { speed_ms: faster });
            }
        }
    }

    fn check_collisions(&mut self, events: &mut Vec<RunnerEvent>) {
        let game_over = self.state == SessionState::GameOver;
        let probe = PlayerProbe {
            lane: self.player.lane,
            jumping: self.player.is_jumping(self.clock_ms, &self.config),
        };
        let report = collision::evaluate(
            &mut self.obstacles,
            &mut self.coin_items,
            probe,
            game_over,
            self.clock_ms,
            &self.config,
        );

        let step = multiplier_tenths(self.config.multiplier_step);
        let cap = multiplier_tenths(self.config.max_multiplier).max(BASE_MULTIPLIER_TENTHS);
        for id in report.collected {
            self.coin_items.remove(id);
            self.coins += 1;
            self.multiplier_tenths = (self.multiplier_tenths + step).min(cap);
            debug!(id, coins = self.coins, multiplier = self.multiplier(), "coin collected");
            events.push(RunnerEvent::CoinCollected {
                id,
                coins: self.coins,
                multiplier: self.multiplier(),
            });
        }

        if let Some(obstacle) = report.hit {
            self.obstacles.remove(obstacle);
            self.state = SessionState::GameOver;
            info!(
                run = self.run,
                score = self.score,
                coins = self.coins,
                clock_ms = self.clock_ms,
                "game over"
            );
            events.push(RunnerEvent::GameOver {
                obstacle,
                score: self.score,
                coins: self.coins,
            });
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Discard the current run and start a fresh one. Every counter, entity,
    /// marker and timer is reset; the RNG stream carries on.
    pub fn restart(&mut self) {
        self.state = SessionState::Running;
        self.score = 0;
        self.coins = 0;
        self.multiplier_tenths = BASE_MULTIPLIER_TENTHS;
        self.speed_ms = self.config.initial_speed_ms;
        self.clock_ms = 0;
        self.accumulated_ms = 0;
        for (_, timer) in self.timers.iter_mut() {
            timer.reset();
        }
        self.obstacles.clear();
        self.coin_items.clear();
        self.track_lines.clear();
        self.player = Player::new();
        self.run += 1;
        info!(run = self.run, "runner session restarted");
    }

    // ── Scripted spawns ─────────────────────────────────────────────

    /// Spawn an obstacle in a chosen lane at the current clock and speed.
    pub fn spawn_obstacle_in(&mut self, lane: Lane, kind: ObstacleKind) -> EntityId {
        spawner::spawn_obstacle(&mut self.obstacles, lane, kind, self.clock_ms, self.speed_ms)
    }

    /// Spawn a coin in a chosen lane at the current clock and speed.
    pub fn spawn_coin_in(&mut self, lane: Lane) -> EntityId {
        spawner::spawn_coin(&mut self.coin_items, lane, self.clock_ms, self.speed_ms)
    }
}

fn interval_for(config: &RunnerConfig, producer: Producer) -> u64 {
    match producer {
        Producer::Score => config.score_interval_ms,
        Producer::Obstacle => config.obstacle_interval_ms,
        Producer::Coin => config.coin_interval_ms,
        Producer::TrackLine => config.track_line_interval_ms,
        Producer::Collision => config.collision_interval_ms,
    }
}

fn multiplier_tenths(value: f64) -> u32 {
    (value * 10.0).round().max(0.0) as u32
}
