//! Events published by the board
//!
//! Consumers (renderer, audio, session) pull these with `Board::drain_events`.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::piece::{IdentityKey, Piece, PieceId};
use super::shuffle::Permutation;

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyReason {
    ZoneFull,
    SlotFrozen,
    DecoyPlaced,
    GenuineTapped,
    ResidentTapped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New head-of-queue piece ready to be shown and routed
    PieceArrivedForRouting(Piece),
    /// Queue is empty, the spawner should deliver the next piece
    ArrivalRequested,
    PiecePlaced {
        piece: Piece,
        direction: Direction,
        index: usize,
    },
    ZoneMatched {
        direction: Direction,
        key: IdentityKey,
        pieces: Vec<PieceId>,
    },
    PenaltyIncurred {
        reason: PenaltyReason,
    },
    SlotFrozen {
        direction: Direction,
        index: usize,
    },
    /// Residents may slide down into the freed slot; see `ZoneRepacked`
    SlotUnfrozen {
        direction: Direction,
        index: usize,
    },
    /// Residents moved to new indices after an unfreeze
    ZoneRepacked {
        direction: Direction,
        layout: Vec<Option<PieceId>>,
    },
    PieceDamaged {
        piece: PieceId,
        health: u8,
    },
    /// `direction` is `None` and `index` is empty for queue removals
    PieceRemoved {
        piece: Piece,
        direction: Direction,
        index: Option<usize>,
    },
    SpecialConsumed {
        piece: PieceId,
        direction: Direction,
        index: usize,
    },
    SpecialWasted {
        piece: PieceId,
        direction: Direction,
    },
    ShuffleStarted {
        permutation: Permutation,
    },
    ShuffleFinished,
    BoardReset,
}
