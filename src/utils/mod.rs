//! Utility modules: data directories and file logging.

pub mod logging;
pub mod paths;
