//! Piece entity

use serde::{Deserialize, Serialize};

use crate::consts::FROZEN_PIECE_HEALTH;

/// Unique piece handle, allocated by the spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// Match compatibility key. Pieces match only when every key in a zone is equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityKey(pub u16);

/// A sortable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub key: IdentityKey,
    /// Frozen pieces absorb taps instead of being removed
    pub frozen: bool,
    /// Remaining taps before a frozen piece breaks
    pub health: u8,
    /// Joker: never matches, unlocks a frozen slot instead
    pub special: bool,
    /// Decoy: should be tapped away, freezes in place if routed
    pub fake: bool,
}

impl Piece {
    pub fn new(id: PieceId, key: IdentityKey) -> Self {
        Self {
            id,
            key,
            frozen: false,
            health: FROZEN_PIECE_HEALTH,
            special: false,
            fake: false,
        }
    }

    pub fn special(id: PieceId, key: IdentityKey) -> Self {
        Self {
            special: true,
            ..Self::new(id, key)
        }
    }

    pub fn fake(id: PieceId, key: IdentityKey) -> Self {
        Self {
            fake: true,
            ..Self::new(id, key)
        }
    }

    /// Freeze (or re-freeze) the piece, resetting its health
    pub fn freeze(&mut self, health: u8) {
        self.frozen = true;
        self.health = health.max(1);
    }

    /// Deal one tap of damage. Returns true once the piece is broken.
    pub fn take_damage(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }

    /// Whether this piece can count toward a match
    pub fn can_match(&self) -> bool {
        !self.frozen && !self.special
    }
}
