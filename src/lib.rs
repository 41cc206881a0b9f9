//! # weighted-dice
//!
//! Self-correcting dice for board game servers.
//!
//! ## Design Principles
//!
//! 1. **Fair in the long run**: Each die biases away from faces it has
//!    rolled often, so streaks correct themselves while single rolls
//!    stay random.
//!
//! 2. **Injected Randomness**: Dice draw from a `UniformSource` passed per
//!    roll. Seed a `GameRng` for reproducible games and tests.
//!
//! 3. **Owned State**: Rolling takes `&mut self`. One owner per die; wrap
//!    in a `Mutex` to share.
//!
//! ## Modules
//!
//! - `core`: RNG, uniform source abstraction, configuration
//! - `dice`: Weighting policies, `WeightedDie`, turn rolls and statistics
//! - `error`: `DiceError`

pub mod core;
pub mod dice;
pub mod error;

// Re-export commonly used types
pub use crate::core::{DiceConfig, GameRng, GameRngState, RandSource, UniformSource};

pub use crate::dice::{
    WeightPolicy, DEFAULT_ALPHA,
    WeightedDie, WeightedDieState, FACES, FALLBACK_FACE,
    DieRollState, DiceStats, GameDice, GameDiceState,
};

pub use crate::error::{DiceError, DiceResult};
