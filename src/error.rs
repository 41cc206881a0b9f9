//! Error type for fallible dice operations.
//!
//! Rolling never fails. Errors only arise at the edges: validating
//! configuration and restoring persisted state.

/// Errors raised while configuring dice or restoring their state.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    #[error("alpha must be finite, got {0}")]
    NonFiniteAlpha(f64),

    #[error("invalid face or total: {0}")]
    InvalidFace(u8),

    #[error("roll count for face {0} is saturated")]
    CountOverflow(u8),

    #[error("failed to encode dice state: {0}")]
    Encode(String),

    #[error("failed to decode dice state: {0}")]
    Decode(String),
}

/// Result alias for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
