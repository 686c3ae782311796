//! Tuning constants for the runner loop.
//!
//! Every timing and threshold the loop depends on lives here so a run can be
//! re-tuned from a JSON file without touching code. Missing fields fall back
//! to the defaults, which reproduce the stock game.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Upper bound on a single `advance` call, in milliseconds.
pub const MAX_FRAME_MS: u64 = 250;

/// An open progress interval `(start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressWindow {
    pub start: f64,
    pub end: f64,
}

impl ProgressWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// True if `progress` lies strictly inside the window.
    pub fn contains(&self, progress: f64) -> bool {
        progress > self.start && progress < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Score ticker period.
    pub score_interval_ms: u64,
    /// Obstacle spawner period.
    pub obstacle_interval_ms: u64,
    /// Coin spawner period.
    pub coin_interval_ms: u64,
    /// Track-line spawner period.
    pub track_line_interval_ms: u64,
    /// Collision evaluator period.
    pub collision_interval_ms: u64,

    /// Points per score tick at multiplier 1.
    pub base_score_per_tick: u64,

    /// Traversal duration of obstacles and coins at the start of a run.
    pub initial_speed_ms: u64,
    /// Fastest traversal duration the ramp can reach.
    pub min_speed_ms: u64,
    /// Duration removed each time the score crosses `speed_ramp_score`.
    pub speed_step_ms: u64,
    pub speed_ramp_score: u64,
    /// Track lines travel this fraction of the current speed.
    pub track_line_duration_factor: f64,

    pub obstacle_window: ProgressWindow,
    pub coin_window: ProgressWindow,

    pub multiplier_step: f64,
    pub max_multiplier: f64,

    /// Length of each jump phase (rise, fall).
    pub jump_phase_ms: u64,
    /// Peak scale of the jump pulse.
    pub jump_scale: f64,
    /// Minimum drag distance for a swipe to register.
    pub swipe_threshold: f64,

    pub lane_spring_tension: f64,
    pub lane_spring_friction: f64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            score_interval_ms: 100,
            obstacle_interval_ms: 1800,
            coin_interval_ms: 600,
            track_line_interval_ms: 200,
            collision_interval_ms: 50,

            base_score_per_tick: 10,

            initial_speed_ms: 2000,
            min_speed_ms: 1000,
            speed_step_ms: 50,
            speed_ramp_score: 1000,
            track_line_duration_factor: 0.8,

            obstacle_window: ProgressWindow::new(0.75, 0.95),
            coin_window: ProgressWindow::new(0.7, 0.9),

            multiplier_step: 0.1,
            max_multiplier: 9.0,

            jump_phase_ms: 350,
            jump_scale: 1.3,
            swipe_threshold: 30.0,

            lane_spring_tension: 100.0,
            lane_spring_friction: 10.0,
        }
    }
}

impl RunnerConfig {
    /// Load a config from a JSON file and validate it.
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Check that every value is usable. Returns a description of the first
    /// problem found.
    pub fn validate(&self) -> Result<(), String> {
        let intervals = [
            ("score_interval_ms", self.score_interval_ms),
            ("obstacle_interval_ms", self.obstacle_interval_ms),
            ("coin_interval_ms", self.coin_interval_ms),
            ("track_line_interval_ms", self.track_line_interval_ms),
            ("collision_interval_ms", self.collision_interval_ms),
            ("jump_phase_ms", self.jump_phase_ms),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(format!("{} must be greater than zero", name));
            }
        }

        if self.min_speed_ms == 0 {
            return Err("min_speed_ms must be greater than zero".to_string());
        }
        if self.min_speed_ms > self.initial_speed_ms {
            return Err(format!(
                "min_speed_ms ({}) exceeds initial_speed_ms ({})",
                self.min_speed_ms, self.initial_speed_ms
            ));
        }
        if self.speed_ramp_score == 0 {
            return Err("speed_ramp_score must be greater than zero".to_string());
        }
        if self.track_line_duration_factor.is_nan() || self.track_line_duration_factor <= 0.0 {
            return Err("track_line_duration_factor must be positive".to_string());
        }

        for (name, window) in [
            ("obstacle_window", self.obstacle_window),
            ("coin_window", self.coin_window),
        ] {
            if !(0.0..=1.0).contains(&window.start)
                || !(0.0..=1.0).contains(&window.end)
                || window.start >= window.end
            {
                return Err(format!(
                    "{} must satisfy 0 <= start < end <= 1 (got {}..{})",
                    name, window.start, window.end
                ));
            }
        }

        if self.multiplier_step < 0.0 {
            return Err("multiplier_step must not be negative".to_string());
        }
        if self.max_multiplier < 1.0 {
            return Err("max_multiplier must be at least 1".to_string());
        }
        if self.swipe_threshold < 0.0 {
            return Err("swipe_threshold must not be negative".to_string());
        }
        if self.lane_spring_tension <= 0.0 || self.lane_spring_friction < 0.0 {
            return Err("lane spring needs positive tension and non-negative friction".to_string());
        }

        Ok(())
    }

    /// Fixed simulation step: the largest duration that divides every
    /// producer period, so each one fires exactly on schedule.
    pub fn step_ms(&self) -> u64 {
        [
            self.score_interval_ms,
            self.obstacle_interval_ms,
            self.coin_interval_ms,
            self.track_line_interval_ms,
            self.collision_interval_ms,
        ]
        .into_iter()
        .fold(0, gcd)
        .max(1)
    }

    /// Traversal duration of a track line spawned at `speed_ms`.
    pub fn track_line_duration(&self, speed_ms: u64) -> u64 {
        ((speed_ms as f64 * self.track_line_duration_factor).round() as u64).max(1)
    }

    /// Total airtime of a jump.
    pub fn jump_duration_ms(&self) -> u64 {
        self.jump_phase_ms.saturating_mul(2)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RunnerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_speed_ms, 2000);
        assert_eq!(config.min_speed_ms, 1000);
    }

    #[test]
    fn test_step_is_gcd_of_intervals() {
        let config = RunnerConfig::default();
        assert_eq!(config.step_ms(), 50);

        let config = RunnerConfig {
            collision_interval_ms: 40,
            ..Default::default()
        };
        assert_eq!(config.step_ms(), 20);
    }

    #[test]
    fn test_window_is_open_interval() {
        let window = ProgressWindow::new(0.75, 0.95);
        assert!(!window.contains(0.75));
        assert!(window.contains(0.8));
        assert!(!window.contains(0.95));
        assert!(!window.contains(0.1));
    }

    #[test]
    fn test_track_line_duration() {
        let config = RunnerConfig::default();
        assert_eq!(config.track_line_duration(2000), 1600);
        assert_eq!(config.track_line_duration(1000), 800);
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = RunnerConfig {
            coin_interval_ms: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("coin_interval_ms"));
    }

    #[test]
    fn test_validate_rejects_inverted_speed_range() {
        let config = RunnerConfig {
            min_speed_ms: 3000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_window() {
        let config = RunnerConfig {
            coin_window: ProgressWindow::new(0.9, 0.7),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("coin_window"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RunnerConfig =
            serde_json::from_str(r#"{ "initial_speed_ms": 2500 }"#).unwrap();
        assert_eq!(config.initial_speed_ms, 2500);
        assert_eq!(config.coin_interval_ms, 600);
        assert_eq!(config.obstacle_window, ProgressWindow::new(0.75, 0.95));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("lane_runner_config_test.json");
        fs::write(&path, r#"{ "swipe_threshold": 12.5 }"#).unwrap();

        let config = RunnerConfig::load(&path).unwrap();
        assert!((config.swipe_threshold - 12.5).abs() < f64::EPSILON);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let path = std::env::temp_dir().join("lane_runner_bad_config_test.json");
        fs::write(&path, r#"{ "score_interval_ms": 0 }"#).unwrap();

        let err = RunnerConfig::load(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        fs::remove_file(path).ok();
    }
}
