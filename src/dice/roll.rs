//! Turn rolls: the red, white and event dice of one game.
//!
//! ## DieRollState
//!
//! Result of one turn roll. The production total is `red + white`.
//!
//! ## DiceStats
//!
//! Running histogram of production totals and event faces, kept for
//! end-of-game reporting.
//!
//! ## GameDice
//!
//! Owns all three dice, each with its own RNG stream derived from the game
//! seed. A new game builds a new `GameDice`; counts are never reset in place.

use serde::{Deserialize, Serialize};

use super::weighted::{WeightedDie, WeightedDieState, FACES};
use crate::core::{DiceConfig, GameRng, GameRngState};
use crate::error::{DiceError, DiceResult};

/// Number of slots in the production-total histogram (totals 1..=12).
pub const TOTAL_SLOTS: usize = 12;

/// Outcome of rolling the red, white and event dice together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRollState {
    /// Red die face (1-6).
    pub red_roll: u8,
    /// White die face (1-6).
    pub white_roll: u8,
    /// Event die face (1-6).
    pub event_roll: u8,
    /// Roll made while setting up the game, not a turn roll.
    pub is_init: bool,
}

impl DieRollState {
    /// Production total, `red + white`.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.red_roll.saturating_add(self.white_roll)
    }
}

/// Histogram of turn rolls over a game.
///
/// `rolls[t - 1]` counts production totals `t`; `event_rolls[f - 1]`
/// counts event faces `f`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceStats {
    /// Production total counts.
    pub rolls: [u32; TOTAL_SLOTS],
    /// Event face counts.
    pub event_rolls: [u32; FACES],
}

impl DiceStats {
    /// Create empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one turn roll.
    ///
    /// Rejects totals outside `2..=12` and event faces outside `1..=6`
    /// without recording anything.
    pub fn record(&mut self, roll: &DieRollState) -> DiceResult<()> {
        let total = roll.total();
        if !(2..=12).contains(&total) {
            return Err(DiceError::InvalidFace(total));
        }
        if !(1..=6).contains(&roll.event_roll) {
            return Err(DiceError::InvalidFace(roll.event_roll));
        }

        self.count(roll);
        Ok(())
    }

    /// Record a roll already known to be in range.
    fn count(&mut self, roll: &DieRollState) {
        self.rolls[usize::from(roll.total()) - 1] += 1;
        self.event_rolls[usize::from(roll.event_roll) - 1] += 1;
    }

    /// Number of recorded turn rolls.
    #[must_use]
    pub fn total_rolls(&self) -> u32 {
        self.rolls.iter().sum()
    }

    /// How often a production total came up. `None` outside `1..=12`.
    #[must_use]
    pub fn frequency(&self, total: u8) -> Option<u32> {
        let index = usize::from(total).checked_sub(1)?;
        self.rolls.get(index).copied()
    }

    /// How often an event face came up. `None` outside `1..=6`.
    #[must_use]
    pub fn event_frequency(&self, face: u8) -> Option<u32> {
        let index = usize::from(face).checked_sub(1)?;
        self.event_rolls.get(index).copied()
    }
}

/// The dice of one game.
#[derive(Clone, Debug)]
pub struct GameDice {
    red: WeightedDie,
    white: WeightedDie,
    event: WeightedDie,
    red_rng: GameRng,
    white_rng: GameRng,
    event_rng: GameRng,
    stats: DiceStats,
}

impl GameDice {
    /// Build fresh dice from a configuration.
    pub fn new(config: &DiceConfig) -> DiceResult<Self> {
        config.validate()?;
        tracing::debug!(policy = %config.policy, seed = config.seed, "creating game dice");

        let root = GameRng::new(config.seed);
        Ok(Self {
            red: WeightedDie::new(config.policy),
            white: WeightedDie::new(config.policy),
            event: WeightedDie::new(config.event_policy()),
            red_rng: root.for_context("red"),
            white_rng: root.for_context("white"),
            event_rng: root.for_context("event"),
            stats: DiceStats::new(),
        })
    }

    /// Roll for a turn and record it in the statistics.
    pub fn roll_turn(&mut self) -> DieRollState {
        let roll = self.roll_all(false);
        // Faces from `WeightedDie::roll` are always in 1..=6.
        self.stats.count(&roll);
        tracing::debug!(
            red = roll.red_roll,
            white = roll.white_roll,
            event = roll.event_roll,
            "turn roll"
        );
        roll
    }

    /// Roll during game setup. Counts toward the dice, not the statistics.
    pub fn initial_roll(&mut self) -> DieRollState {
        self.roll_all(true)
    }

    fn roll_all(&mut self, is_init: bool) -> DieRollState {
        DieRollState {
            red_roll: self.red.roll(&mut self.red_rng),
            white_roll: self.white.roll(&mut self.white_rng),
            event_roll: self.event.roll(&mut self.event_rng),
            is_init,
        }
    }

    /// The red die.
    #[must_use]
    pub fn red(&self) -> &WeightedDie {
        &self.red
    }

    /// The white die.
    #[must_use]
    pub fn white(&self) -> &WeightedDie {
        &self.white
    }

    /// The event die.
    #[must_use]
    pub fn event(&self) -> &WeightedDie {
        &self.event
    }

    /// Turn roll statistics.
    #[must_use]
    pub fn stats(&self) -> &DiceStats {
        &self.stats
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameDiceState {
        GameDiceState {
            red: self.red.state(),
            white: self.white.state(),
            event: self.event.state(),
            red_rng: self.red_rng.state(),
            white_rng: self.white_rng.state(),
            event_rng: self.event_rng.state(),
            stats: self.stats.clone(),
        }
    }

    /// Restore from a saved state.
    pub fn from_state(state: &GameDiceState) -> DiceResult<Self> {
        Ok(Self {
            red: WeightedDie::from_state(&state.red)?,
            white: WeightedDie::from_state(&state.white)?,
            event: WeightedDie::from_state(&state.event)?,
            red_rng: GameRng::from_state(&state.red_rng),
            white_rng: GameRng::from_state(&state.white_rng),
            event_rng: GameRng::from_state(&state.event_rng),
            stats: state.stats.clone(),
        })
    }
}

/// Serializable snapshot of a game's dice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameDiceState {
    /// Red die.
    pub red: WeightedDieState,
    /// White die.
    pub white: WeightedDieState,
    /// Event die.
    pub event: WeightedDieState,
    /// Red die RNG position.
    pub red_rng: GameRngState,
    /// White die RNG position.
    pub white_rng: GameRngState,
    /// Event die RNG position.
    pub event_rng: GameRngState,
    /// Turn roll statistics.
    pub stats: DiceStats,
}

impl GameDiceState {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> DiceResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| DiceError::Encode(e.to_string()))
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> DiceResult<Self> {
        bincode::deserialize(bytes).map_err(|e| DiceError::Decode(e.to_string()))
    }
}
