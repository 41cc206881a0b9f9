//! Weighting policies: how roll counts turn into face weights.

use serde::{Deserialize, Serialize};

use super::weighted::FACES;
use crate::error::{DiceError, DiceResult};

/// Suggested decay rate for [`WeightPolicy::ExponentialDecay`].
///
/// Strong enough to smooth streaks without making rolls predictable.
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Rule converting a face's roll count into an unnormalized weight.
///
/// Both policies push probability away from frequently rolled faces and
/// converge to uniform as counts grow comparably large.
///
/// - `ExponentialDecay { alpha }`: `exp(-alpha * count)`. Each extra roll of a
///   face multiplies its weight by `exp(-alpha)`. `alpha = 0` is uniform.
/// - `InverseCount`: `1 / (1 + count)`. Harmonic decay, no parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum WeightPolicy {
    /// Geometric decay per extra roll, tunable via `alpha`.
    ExponentialDecay {
        /// Correction strength. Larger is more aggressive.
        alpha: f64,
    },
    /// Harmonic decay per extra roll.
    InverseCount,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        WeightPolicy::ExponentialDecay { alpha: DEFAULT_ALPHA }
    }
}

impl WeightPolicy {
    /// Exponential decay with the given alpha.
    #[must_use]
    pub const fn exponential(alpha: f64) -> Self {
        WeightPolicy::ExponentialDecay { alpha }
    }

    /// Weight of a face that has been rolled `count` times, unscaled.
    ///
    /// For exponential decay this underflows to 0 (or overflows for negative
    /// alpha) once `alpha * count` is large; use [`WeightPolicy::weights`]
    /// to weigh a whole die.
    #[inline]
    #[must_use]
    pub fn weight(&self, count: u64) -> f64 {
        match *self {
            WeightPolicy::ExponentialDecay { alpha } => (-alpha * count as f64).exp(),
            WeightPolicy::InverseCount => 1.0 / (1.0 + count as f64),
        }
    }

    /// Weights of all faces of a die with the given counts.
    ///
    /// Exponential weights are divided by the weight of the most favoured
    /// face (lowest count for `alpha >= 0`, highest for `alpha < 0`), so that
    /// face weighs exactly 1 and none exceeds 1. Dividing by a common factor
    /// leaves every selection probability unchanged.
    #[must_use]
    pub fn weights(&self, counts: &[u64; FACES]) -> [f64; FACES] {
        match *self {
            WeightPolicy::ExponentialDecay { alpha } => {
                let base = if alpha >= 0.0 {
                    counts.iter().min().copied().unwrap_or(0)
                } else {
                    counts.iter().max().copied().unwrap_or(0)
                };
                counts.map(|count| (-alpha.abs() * count.abs_diff(base) as f64).exp())
            }
            WeightPolicy::InverseCount => counts.map(|count| self.weight(count)),
        }
    }

    /// Whether this policy ignores counts entirely.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        matches!(*self, WeightPolicy::ExponentialDecay { alpha } if alpha == 0.0)
    }

    /// Check the policy can produce finite weights.
    ///
    /// Non-positive alpha is accepted (it weakens or disables the bias).
    /// NaN or infinite alpha is rejected.
    pub fn validate(&self) -> DiceResult<()> {
        match *self {
            WeightPolicy::ExponentialDecay { alpha } if !alpha.is_finite() => {
                Err(DiceError::NonFiniteAlpha(alpha))
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for WeightPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightPolicy::ExponentialDecay { alpha } => write!(f, "ExponentialDecay(alpha={alpha})"),
            WeightPolicy::InverseCount => write!(f, "InverseCount"),
        }
    }
}
