//! Zone store: one directional container of ordered slots
//!
//! Occupants are always packed into the lowest-index non-frozen slots, in the
//! order they arrived. A slot is exactly one of empty, frozen or occupied, so a
//! frozen slot can never hold a piece.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::piece::{Piece, PieceId};
use crate::error::EngineError;

/// A single slot in a zone
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Slot {
    #[default]
    Empty,
    /// Locked until a special piece unfreezes it
    Frozen,
    Occupied(Piece),
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self, Slot::Frozen)
    }

    pub fn piece(&self) -> Option<&Piece> {
        match self {
            Slot::Occupied(piece) => Some(piece),
            _ => None,
        }
    }
}

/// A placement the zone refused. The piece is handed back untouched.
#[derive(Debug)]
pub struct Rejected {
    pub error: EngineError,
    pub piece: Piece,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    direction: Direction,
    slots: Vec<Slot>,
}

impl Zone {
    pub fn new(direction: Direction, capacity: usize) -> Self {
        Self {
            direction,
            slots: vec![Slot::Empty; capacity],
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Occupants in slot order (front = oldest)
    pub fn occupants(&self) -> impl Iterator<Item = &Piece> {
        self.slots.iter().filter_map(Slot::piece)
    }

    /// Piece id per slot, `None` for empty or frozen slots
    pub fn layout(&self) -> Vec<Option<PieceId>> {
        self.slots.iter().map(|s| s.piece().map(|p| p.id)).collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupants().count()
    }

    pub fn frozen_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_frozen()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_empty()).count()
    }

    /// Capacity minus frozen slots
    pub fn non_frozen_capacity(&self) -> usize {
        self.capacity() - self.frozen_count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == self.capacity()
    }

    pub fn is_slot_frozen(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Slot::is_frozen)
    }

    /// Slot index holding the given piece
    pub fn find(&self, id: PieceId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.piece().is_some_and(|p| p.id == id))
    }

    pub fn piece_mut(&mut self, index: usize) -> Option<&mut Piece> {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(piece)) => Some(piece),
            _ => None,
        }
    }

    /// First frozen slot index, if any
    pub fn first_frozen(&self) -> Option<usize> {
        self.slots.iter().position(Slot::is_frozen)
    }

    /// Slot the next regular placement would land in
    pub fn next_slot(&self) -> Result<usize, EngineError> {
        match self.slots.iter().position(Slot::is_empty) {
            Some(index) => Ok(index),
            None if self.frozen_count() > 0 => Err(EngineError::SlotFrozen(self.direction)),
            None => Err(EngineError::ZoneFull(self.direction)),
        }
    }

    /// Append a piece at the next free, non-frozen slot
    pub fn try_place(&mut self, piece: Piece) -> Result<usize, Rejected> {
        match self.next_slot() {
            Ok(index) => {
                self.slots[index] = Slot::Occupied(piece);
                Ok(index)
            }
            Err(error) => Err(Rejected { error, piece }),
        }
    }

    /// Detach the piece at `index` and close the gap
    pub fn remove_at(&mut self, index: usize) -> Option<Piece> {
        let slot = self.slots.get_mut(index)?;
        if !matches!(slot, Slot::Occupied(_)) {
            return None;
        }
        let Slot::Occupied(piece) = std::mem::take(slot) else {
            return None;
        };
        self.compact();
        Some(piece)
    }

    /// Mark an empty slot frozen. Returns false if the slot was not empty.
    pub fn freeze(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.is_empty() => {
                *slot = Slot::Frozen;
                true
            }
            _ => false,
        }
    }

    /// Clear a frozen mark. Returns false if the slot was not frozen.
    pub fn unfreeze(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.is_frozen() => {
                *slot = Slot::Empty;
                self.compact();
                true
            }
            _ => false,
        }
    }

    /// Repack occupants front to back into non-frozen slots, keeping their order
    pub fn compact(&mut self) {
        let pieces = self.take_occupants();
        let overflow = self.receive(pieces);
        debug_assert!(overflow.is_empty(), "compaction cannot grow a zone");
    }

    /// Detach every occupant, leaving frozen slots in place
    pub fn take_occupants(&mut self) -> Vec<Piece> {
        let mut pieces = Vec::with_capacity(self.capacity());
        for slot in &mut self.slots {
            if matches!(slot, Slot::Occupied(_)) {
                if let Slot::Occupied(piece) = std::mem::take(slot) {
                    pieces.push(piece);
                }
            }
        }
        pieces
    }

    /// Fill empty slots in index order. Pieces that do not fit are returned.
    pub fn receive(&mut self, pieces: Vec<Piece>) -> Vec<Piece> {
        let mut incoming = pieces.into_iter();
        for slot in self.slots.iter_mut().filter(|s| s.is_empty()) {
            match incoming.next() {
                Some(piece) => *slot = Slot::Occupied(piece),
                None => break,
            }
        }
        incoming.collect()
    }

    /// Drop all occupants and frozen marks
    pub fn clear(&mut self) -> Vec<Piece> {
        let pieces = self.take_occupants();
        self.slots.fill(Slot::Empty);
        pieces
    }
}
