//! Self-correcting six-sided die.
//!
//! A `WeightedDie` remembers how often each face has come up and biases
//! each roll away from the faces it has produced most. Short streaks get
//! corrected while individual rolls stay random.
//!
//! ## Rolling
//!
//! 1. Weight each face with the die's [`WeightPolicy`].
//! 2. Draw `r` uniformly from `[0, total)`.
//! 3. Pick the first face whose cumulative weight exceeds `r`.
//! 4. Count the pick and return it (1-indexed).
//!
//! If rounding leaves no face above `r`, face [`FALLBACK_FACE`] is chosen.
//!
//! Exponential weights are scaled so the most favoured face weighs 1 (see
//! [`WeightPolicy::weights`]). Long games never underflow every weight.
//!
//! ```
//! use weighted_dice::core::GameRng;
//! use weighted_dice::dice::WeightedDie;
//!
//! let mut rng = GameRng::new(42);
//! let mut die = WeightedDie::exponential(0.3);
//!
//! let face = die.roll(&mut rng);
//! assert!((1..=6).contains(&face));
//! assert_eq!(die.total_rolls(), 1);
//! ```

use serde::{Deserialize, Serialize};

use super::policy::WeightPolicy;
use crate::core::UniformSource;
use crate::error::{DiceError, DiceResult};

/// Number of faces on the die.
pub const FACES: usize = 6;

/// Face selected when the cumulative walk never passes the draw.
pub const FALLBACK_FACE: u8 = 6;

const FALLBACK_INDEX: usize = FALLBACK_FACE as usize - 1;

/// Index of the first weight whose running sum exceeds `r`.
///
/// Returns `None` when no running sum exceeds `r` (a draw at or beyond
/// the total, or all-zero weights).
#[must_use]
pub fn find_index(weights: &[f64; FACES], r: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for (i, &weight) in weights.iter().enumerate() {
        cumulative += weight;
        if r < cumulative {
            return Some(i);
        }
    }
    None
}

/// Selection rule used by [`WeightedDie::roll`], including the fallback.
///
/// Deterministic: the same weights and draw always select the same index.
#[must_use]
pub fn select_index(weights: &[f64; FACES], r: f64) -> usize {
    find_index(weights, r).unwrap_or(FALLBACK_INDEX)
}

/// A six-sided die that corrects toward uniformity.
///
/// Not synchronized: `roll` takes `&mut self`, so each die has a single
/// owner at a time. Share behind a `Mutex` if several tasks roll it.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedDie {
    counts: [u64; FACES],
    policy: WeightPolicy,
}

impl WeightedDie {
    /// Create a fresh die with the given policy.
    #[must_use]
    pub fn new(policy: WeightPolicy) -> Self {
        Self::with_counts(policy, [0; FACES])
    }

    /// Create a fresh die with exponential decay weighting.
    ///
    /// Around 0.3 balances correction against predictability. `alpha = 0`
    /// rolls uniformly. Negative alpha is accepted but favours faces already
    /// rolled: the most rolled face tends to lock in.
    #[must_use]
    pub fn exponential(alpha: f64) -> Self {
        Self::new(WeightPolicy::ExponentialDecay { alpha })
    }

    /// Create a fresh die with inverse-count weighting.
    #[must_use]
    pub fn inverse_count() -> Self {
        Self::new(WeightPolicy::InverseCount)
    }

    /// Rebuild a die with existing roll history.
    #[must_use]
    pub fn with_counts(policy: WeightPolicy, counts: [u64; FACES]) -> Self {
        Self { counts, policy }
    }

    /// Roll the die, returning a face in `1..=6`.
    ///
    /// Increments exactly one count per call.
    pub fn roll<R: UniformSource + ?Sized>(&mut self, rng: &mut R) -> u8 {
        let weights = self.weights();
        let total: f64 = weights.iter().sum();
        let r = rng.next_unit() * total;

        let index = match find_index(&weights, r) {
            Some(index) => index,
            None => {
                tracing::debug!(r, total, "weighted die fell back to last face");
                FALLBACK_INDEX
            }
        };

        // Unreachable by rolling; `from_state` rejects saturated counts.
        self.counts[index] = self.counts[index].saturating_add(1);
        let face = index as u8 + 1;
        tracing::trace!(face, r, total, policy = %self.policy, "rolled weighted die");
        face
    }

    /// Per-face roll counts, `counts()[i]` for face `i + 1`.
    #[must_use]
    pub fn counts(&self) -> &[u64; FACES] {
        &self.counts
    }

    /// Total rolls made with this die.
    #[must_use]
    pub fn total_rolls(&self) -> u64 {
        self.counts.iter().fold(0u64, |total, &c| total.saturating_add(c))
    }

    /// The weighting policy.
    #[must_use]
    pub fn policy(&self) -> WeightPolicy {
        self.policy
    }

    /// Current unnormalized weight of every face.
    ///
    /// All weights are positive, finite and at most 1 for `alpha >= 0`.
    #[must_use]
    pub fn weights(&self) -> [f64; FACES] {
        self.policy.weights(&self.counts)
    }

    /// Current selection probability of every face. Sums to 1.
    #[must_use]
    pub fn probabilities(&self) -> [f64; FACES] {
        let weights = self.weights();
        let total: f64 = weights.iter().sum();
        weights.map(|w| w / total)
    }

    /// Current weight of one face (1-indexed). `None` outside `1..=6`.
    #[must_use]
    pub fn face_weight(&self, face: u8) -> Option<f64> {
        let index = usize::from(face).checked_sub(1)?;
        self.weights().get(index).copied()
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> WeightedDieState {
        WeightedDieState {
            counts: self.counts,
            policy: self.policy,
        }
    }

    /// Restore from a saved state.
    ///
    /// Rejects non-finite alpha and counts that could not be incremented.
    pub fn from_state(state: &WeightedDieState) -> DiceResult<Self> {
        state.policy.validate()?;
        if let Some(face) = state.counts.iter().position(|&c| c == u64::MAX) {
            return Err(DiceError::CountOverflow(face as u8 + 1));
        }
        Ok(Self::with_counts(state.policy, state.counts))
    }
}

/// Serializable die state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedDieState {
    /// Per-face roll counts.
    pub counts: [u64; FACES],
    /// Weighting policy.
    pub policy: WeightPolicy,
}

impl WeightedDieState {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> DiceResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| DiceError::Encode(e.to_string()))
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> DiceResult<Self> {
        bincode::deserialize(bytes).map_err(|e| DiceError::Decode(e.to_string()))
    }
}
