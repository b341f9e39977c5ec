//! Deterministic simulation module
//!
//! All zone/slot logic lives here. This module must be pure and deterministic:
//! - Delta-time timers only
//! - Seeded RNG only
//! - Stable iteration order (zones in `Direction::ZONES` order)
//! - No rendering or platform dependencies

pub mod board;
pub mod direction;
pub mod event;
pub mod freeze;
pub mod matching;
pub mod piece;
pub mod queue;
pub mod shuffle;
pub mod tick;
pub mod timer;
pub mod zone;

pub use board::{Board, BoardSnapshot, RouteOutcome, TapOutcome};
pub use direction::{Direction, Inversion};
pub use event::{GameEvent, PenaltyReason};
pub use freeze::FreezeScheduler;
pub use piece::{IdentityKey, Piece, PieceId};
pub use queue::ArrivalQueue;
pub use shuffle::{Permutation, ShuffleScheduler, find_feasible, random_permutation};
pub use tick::{TickInput, tick};
pub use timer::Timer;
pub use zone::{Rejected, Slot, Zone};
