//! Pseudo-3D projection of the track.
//!
//! Entities travel from a vanishing band near the top of the screen
//! (progress 0) to the bottom (progress 1). Their apparent size grows
//! linearly and their distance from the screen centre is scaled with it, so
//! the three lanes converge toward the horizon.

use super::lane::Lane;

/// Top of the track, as a fraction of screen height.
pub const TRACK_TOP: f64 = 0.15;
/// Bottom of the track, as a fraction of screen height.
pub const TRACK_BOTTOM: f64 = 0.85;
/// Apparent scale of an entity at the horizon.
pub const PERSPECTIVE_SCALE: f64 = 0.4;

/// Normalized screen placement of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Horizontal centre, fraction of screen width.
    pub x: f64,
    /// Vertical position, fraction of screen height.
    pub y: f64,
    /// Apparent size relative to full size at the camera.
    pub scale: f64,
}

/// Project a progress value on a horizontal position `screen_x`.
pub fn project_x(progress: f64, screen_x: f64) -> Projected {
    let p = progress.clamp(0.0, 1.0);
    let y = TRACK_TOP + p * (TRACK_BOTTOM - TRACK_TOP);
    let scale = PERSPECTIVE_SCALE + p * (1.0 - PERSPECTIVE_SCALE);
    let x = 0.5 + (screen_x - 0.5) * scale;
    Projected { x, y, scale }
}

pub fn project(progress: f64, lane: Lane) -> Projected {
    project_x(progress, lane.screen_x())
}

/// Track-line opacity: fades in to 0.6 at mid-track, then out to nothing.
pub fn track_line_opacity(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    if p <= 0.5 {
        0.3 + (0.6 - 0.3) * (p / 0.5)
    } else {
        0.6 * (1.0 - (p - 0.5) / 0.5)
    }
}
