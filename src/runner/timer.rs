//! Fixed-period producers driven by the session clock.

/// The five periodic callbacks of a run, in the order they are serviced
/// within a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Producer {
    Score,
    Obstacle,
    Coin,
    TrackLine,
    Collision,
}

impl Producer {
    pub const ALL: [Producer; 5] = [
        Producer::Score,
        Producer::Obstacle,
        Producer::Coin,
        Producer::TrackLine,
        Producer::Collision,
    ];
}

/// A repeating timer. Fires every `interval_ms` of advanced time, starting
/// one full interval after it is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTimer {
    interval_ms: u64,
    elapsed_ms: u64,
}

impl PeriodicTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Advance by `dt_ms` and return how many times the timer fired.
    pub fn advance(&mut self, dt_ms: u64) -> u32 {
        self.elapsed_ms += dt_ms;
        let fired = self.elapsed_ms / self.interval_ms;
        self.elapsed_ms %= self.interval_ms;
        fired as u32
    }

    /// Re-arm from zero.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}
