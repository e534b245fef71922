//! Core engine types: difficulty presets, configuration, RNG.

pub mod config;
pub mod rng;

pub use config::{time_limit_for, Difficulty, GameConfig};
pub use rng::GameRng;
