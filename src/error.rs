//! Engine error taxonomy
//!
//! Every variant is an expected, recoverable condition. The board is always
//! left valid when one of these is returned.

use thiserror::Error;

use crate::sim::{Direction, PieceId};

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("zone {0:?} has no empty slot")]
    ZoneFull(Direction),
    #[error("zone {0:?} only has frozen slots left")]
    SlotFrozen(Direction),
    #[error("no capacity-feasible shuffle found in {attempts} attempts")]
    InfeasibleShuffle { attempts: u32 },
    #[error("piece {0:?} not found")]
    PieceNotFound(PieceId),
    #[error("direction {0:?} is not a placement target")]
    InvalidDirection(Direction),
    #[error("slot {index} is out of range for zone {direction:?}")]
    InvalidSlot { direction: Direction, index: usize },
    #[error("input is disabled")]
    InputDisabled,
    #[error("a shuffle is in progress")]
    ShuffleInProgress,
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl EngineError {
    /// True for the routing failures that cost the player a life
    pub fn is_penalized(&self) -> bool {
        matches!(self, EngineError::ZoneFull(_) | EngineError::SlotFrozen(_))
    }
}
