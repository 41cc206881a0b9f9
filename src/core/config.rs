//! Dice configuration.
//!
//! A game picks its weighting policy and seed once at startup. The
//! configuration is fixed for the lifetime of the dice it builds.

use serde::{Deserialize, Serialize};

use crate::dice::WeightPolicy;
use crate::error::DiceResult;

/// Configuration for a game's dice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiceConfig {
    /// Weighting policy for the red and white dice.
    pub policy: WeightPolicy,

    /// Seed for the game's RNG.
    /// Same seed produces the same roll sequence.
    pub seed: u64,

    /// Apply `policy` to the event die too.
    /// When false the event die rolls uniformly.
    pub weighted_event_die: bool,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            policy: WeightPolicy::default(),
            seed: 42,
            weighted_event_die: true,
        }
    }
}

impl DiceConfig {
    /// Use the given weighting policy.
    #[must_use]
    pub fn with_policy(mut self, policy: WeightPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use exponential decay with the given alpha.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.policy = WeightPolicy::ExponentialDecay { alpha };
        self
    }

    /// Use inverse-count weighting.
    #[must_use]
    pub fn inverse_count(mut self) -> Self {
        self.policy = WeightPolicy::InverseCount;
        self
    }

    /// Use a custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Roll the event die without weighting.
    #[must_use]
    pub fn with_uniform_event_die(mut self) -> Self {
        self.weighted_event_die = false;
        self
    }

    /// Policy used for the event die.
    #[must_use]
    pub fn event_policy(&self) -> WeightPolicy {
        if self.weighted_event_die {
            self.policy
        } else {
            WeightPolicy::ExponentialDecay { alpha: 0.0 }
        }
    }

    /// Check the configuration can build working dice.
    pub fn validate(&self) -> DiceResult<()> {
        self.policy.validate()
    }
}
