//! Core types: seats, per-seat storage, RNG, configuration.
//!
//! Nothing here knows about cards or attacks; every other module builds
//! on these.

pub mod config;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
