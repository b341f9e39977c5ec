//! Arrival queue
//!
//! Pieces wait here until routed or tapped away. The head is the only piece
//! the player can act on, and a refill is requested only once the queue is
//! empty and no request is already outstanding.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArrivalQueue {
    pending: VecDeque<Piece>,
    /// A refill has been requested and not yet answered
    awaiting: bool,
}

impl ArrivalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an arrival. Returns true if it became the current head.
    pub fn push(&mut self, piece: Piece) -> bool {
        self.awaiting = false;
        self.pending.push_back(piece);
        self.pending.len() == 1
    }

    pub fn head(&self) -> Option<&Piece> {
        self.pending.front()
    }

    pub fn is_head(&self, id: PieceId) -> bool {
        self.head().is_some_and(|p| p.id == id)
    }

    pub fn pop(&mut self) -> Option<Piece> {
        self.pending.pop_front()
    }

    /// Put a rejected head back in front
    pub fn restore(&mut self, piece: Piece) {
        self.pending.push_front(piece);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending pieces, head first
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pending.iter()
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Mark a refill as requested. Returns false if one is pending or a piece is current.
    pub fn request_refill(&mut self) -> bool {
        if self.awaiting || !self.pending.is_empty() {
            return false;
        }
        self.awaiting = true;
        true
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting
    }

    /// Empty the queue and forget any outstanding request
    pub fn flush(&mut self) -> Vec<Piece> {
        self.awaiting = false;
        self.pending.drain(..).collect()
    }
}
