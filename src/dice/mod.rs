//! Weighted dice: policies, the self-correcting die, and turn rolls.
//!
//! `WeightedDie` is the leaf component. `GameDice` bundles the three dice
//! a game rolls each turn and tracks their statistics.

pub mod policy;
pub mod weighted;
pub mod roll;

pub use policy::{WeightPolicy, DEFAULT_ALPHA};
pub use weighted::{find_index, select_index, WeightedDie, WeightedDieState, FACES, FALLBACK_FACE};
pub use roll::{DiceStats, DieRollState, GameDice, GameDiceState, TOTAL_SLOTS};
