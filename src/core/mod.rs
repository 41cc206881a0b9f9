//! Core engine types: RNG and configuration.
//!
//! Dice never own a process-wide RNG. Randomness is injected through
//! `UniformSource`, usually a seeded `GameRng`.

pub mod rng;
pub mod config;

pub use rng::{GameRng, GameRngState, RandSource, UniformSource};
pub use config::DiceConfig;
