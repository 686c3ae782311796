//! File logging.
//!
//! The terminal belongs to the UI, so events go to a daily-rotated file at
//! `~/.lane-runner/logs/lane-runner.log`. Filtering follows `RUST_LOG`
//! (default `info`), e.g. `RUST_LOG=lane_runner::runner=debug` to trace
//! spawns and pickups.

use super::paths;
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber. Call once, before entering raw mode, so a
/// failure can still be reported on stderr.
pub fn init() -> io::Result<()> {
    let logs_dir = paths::logs_dir()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::daily(logs_dir, "lane-runner.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}
