//! The runner loop: lanes, entities, spawning, collisions, the player and
//! the session that ties them together.

pub mod collision;
pub mod config;
pub mod entity;
pub mod lane;
pub mod player;
pub mod projection;
pub mod session;
pub mod spawner;
pub mod timer;

pub use config::{ProgressWindow, RunnerConfig, MAX_FRAME_MS};
pub use entity::{Coin, EntityArena, EntityId, Obstacle, ObstacleKind, TrackLine, Traversal, Traversing};
pub use lane::Lane;
pub use player::{Gesture, Player, Swipe, SwipeOutcome};
pub use session::{RunnerEvent, Session, SessionState};
