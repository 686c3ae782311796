//! Lane Runner - terminal endless runner library
//!
//! This module exposes the game logic for testing and external use. The
//! terminal UI lives in the binary.

pub mod profile;
pub mod runner;
pub mod shop;
pub mod utils;
