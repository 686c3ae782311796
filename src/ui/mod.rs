pub mod game_common;
pub mod home_scene;
pub mod runner_scene;
