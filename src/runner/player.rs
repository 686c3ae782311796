//! Player controller: lane changes, jumps, and the animation curves the
//! renderer samples.

use super::config::RunnerConfig;
use super::lane::Lane;

/// Lane-change animations are dropped after this long.
const LANE_SHIFT_SETTLE_MS: u64 = 2000;

/// A completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Left,
    Right,
    Up,
}

/// Raw drag displacement from press to release, in screen units.
/// Negative `dy` is upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub dx: f64,
    pub dy: f64,
}

impl Gesture {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Interpret the drag. Predominantly horizontal drags past `threshold`
    /// are lane swipes; predominantly vertical upward drags past it are
    /// jumps. Anything else is ignored.
    pub fn classify(&self, threshold: f64) -> Option<Swipe> {
        if self.dx.abs() > self.dy.abs() {
            if self.dx > threshold {
                Some(Swipe::Right)
            } else if self.dx < -threshold {
                Some(Swipe::Left)
            } else {
                None
            }
        } else if self.dy < -threshold {
            Some(Swipe::Up)
        } else {
            None
        }
    }
}

/// What a swipe did to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Moved { from: Lane, to: Lane },
    Jumped,
    /// Lane swipe toward a track edge the player already occupies.
    AtEdge,
    /// Jump requested while one is still in flight.
    AlreadyJumping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneShift {
    pub from: Lane,
    pub started_at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub started_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Player {
    /// Logical lane, used for collisions. Changes the instant a swipe lands.
    pub lane: Lane,
    /// Visual transition from the previous lane.
    pub shift: Option<LaneShift>,
    pub jump: Option<Jump>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_jumping(&self, now_ms: u64, config: &RunnerConfig) -> bool {
        self.jump
            .is_some_and(|j| now_ms < j.started_at_ms.saturating_add(config.jump_duration_ms()))
    }

    /// Apply a swipe at `now_ms`.
    pub fn apply_swipe(&mut self, swipe: Swipe, now_ms: u64, config: &RunnerConfig) -> SwipeOutcome {
        match swipe {
            Swipe::Left | Swipe::Right => {
                let target = if swipe == Swipe::Left {
                    self.lane.left()
                } else {
                    self.lane.right()
                };
                match target {
                    Some(to) => {
                        let from = self.lane;
                        self.lane = to;
                        self.shift = Some(LaneShift {
                            from,
                            started_at_ms: now_ms,
                        });
                        SwipeOutcome::Moved { from, to }
                    }
                    None => SwipeOutcome::AtEdge,
                }
            }
            Swipe::Up => {
                if self.is_jumping(now_ms, config) {
                    SwipeOutcome::AlreadyJumping
                } else {
                    self.jump = Some(Jump {
                        started_at_ms: now_ms,
                    });
                    SwipeOutcome::Jumped
                }
            }
        }
    }

    /// Drop finished animations. Returns true if a jump landed.
    pub fn settle(&mut self, now_ms: u64, config: &RunnerConfig) -> bool {
        if self
            .shift
            .is_some_and(|s| now_ms.saturating_sub(s.started_at_ms) >= LANE_SHIFT_SETTLE_MS)
        {
            self.shift = None;
        }

        if self.jump.is_some() && !self.is_jumping(now_ms, config) {
            self.jump = None;
            return true;
        }
        false
    }

    /// Horizontal screen position (fraction of width), following a damped
    /// spring from the previous lane.
    pub fn visual_x(&self, now_ms: u64, config: &RunnerConfig) -> f64 {
        let target = self.lane.screen_x();
        match self.shift {
            Some(shift) => {
                let t = now_ms.saturating_sub(shift.started_at_ms) as f64 / 1000.0;
                let p = spring_progress(t, config.lane_spring_tension, config.lane_spring_friction);
                let from = shift.from.screen_x();
                from + (target - from) * p
            }
            None => target,
        }
    }

    /// Jump height in `[0, 1]`: linear rise over the first phase, linear
    /// fall over the second.
    pub fn jump_height(&self, now_ms: u64, config: &RunnerConfig) -> f64 {
        let Some(jump) = self.jump else {
            return 0.0;
        };
        let phase = config.jump_phase_ms as f64;
        let t = now_ms.saturating_sub(jump.started_at_ms) as f64;
        if t < phase {
            t / phase
        } else if t < phase * 2.0 {
            1.0 - (t - phase) / phase
        } else {
            0.0
        }
    }

    /// Sprite scale, pulsing to `jump_scale` at the top of a jump.
    pub fn scale(&self, now_ms: u64, config: &RunnerConfig) -> f64 {
        1.0 + (config.jump_scale - 1.0) * self.jump_height(now_ms, config)
    }
}

/// Position of a unit-mass spring released from 0 toward 1 after `t`
/// seconds.
pub fn spring_progress(t: f64, tension: f64, friction: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let omega = tension.sqrt();
    let zeta = friction / (2.0 * omega);

    if zeta < 1.0 {
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega * t).exp();
        1.0 - envelope * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
    } else if (zeta - 1.0).abs() < f64::EPSILON {
        1.0 - (-omega * t).exp() * (1.0 + omega * t)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
    }
}
