//! Deterministic random number generation for dice rolls.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical roll sequences
//! - **Injectable**: Dice draw from any `UniformSource`, never a global RNG
//! - **Forkable**: Create independent branches (e.g., one per table)
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use weighted_dice::core::{GameRng, UniformSource};
//!
//! let mut rng = GameRng::new(42);
//! let u = rng.next_unit();
//! assert!((0.0..1.0).contains(&u));
//!
//! // Same seed, same draws
//! let mut again = GameRng::new(42);
//! assert_eq!(u, again.next_unit());
//! ```

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A source of independent draws uniformly distributed over `[0, 1)`.
///
/// This is the only capability a weighted die needs from its environment.
/// Implementations must never return a value outside `[0, 1)`; the die's
/// fallback rule still keeps the roll well-defined if one does.
pub trait UniformSource {
    /// Draw the next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Adapter that turns any `rand` generator into a `UniformSource`.
///
/// ```
/// use weighted_dice::core::{RandSource, UniformSource};
///
/// let mut source = RandSource(rand::thread_rng());
/// assert!(source.next_unit() < 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct RandSource<R>(pub R);

impl<R: RngCore> UniformSource for RandSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Deterministic RNG backing a game's dice.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// Separates randomness domains (e.g., "red" vs "event" die).
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
            fork_counter: 0,
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl UniformSource for GameRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many draws have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}
