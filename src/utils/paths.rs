//! Locations under ~/.lane-runner/.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.lane-runner/ directory path, creating it if needed.
pub fn runner_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".lane-runner");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the log directory, creating it if needed.
pub fn logs_dir() -> io::Result<PathBuf> {
    let dir = runner_dir()?.join("logs");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
