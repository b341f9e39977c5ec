//! Fixed timestep simulation tick
//!
//! Applies one frame of player commands to the board, then advances the
//! freeze/shuffle timers.

use super::board::Board;
use super::direction::Direction;
use super::piece::PieceId;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Swipe routing the current piece
    pub route: Option<Direction>,
    /// Tap on a piece (queue head or zone resident)
    pub tap: Option<PieceId>,
    /// Swap-inversion override for this and later ticks
    pub inversion: Option<(bool, bool)>,
}

/// Advance the board by one fixed timestep
pub fn tick(board: &mut Board, input: &TickInput, dt: f32) {
    if let Some((horizontal, vertical)) = input.inversion {
        board.set_inversion(horizontal, vertical);
    }

    // Taps first so a decoy can be cleared and the next piece routed later
    if let Some(id) = input.tap {
        if let Err(err) = board.tap_remove(id) {
            log::debug!("Tap on {:?} ignored: {}", id, err);
        }
    }

    if let Some(direction) = input.route {
        match board.current_piece().map(|p| p.id) {
            Some(id) => {
                if let Err(err) = board.route(direction, id) {
                    log::debug!("Route {:?} failed: {}", direction, err);
                }
            }
            None => log::debug!("Route {:?} with no piece waiting", direction),
        }
    }

    board.advance(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Tuning;
    use crate::sim::piece::{IdentityKey, Piece};

    #[test]
    fn test_tick_routes_current_piece() {
        let mut board = Board::new(12345, Tuning::calm());
        board.on_piece_arrived(Piece::new(PieceId(1), IdentityKey(0)));

        let input = TickInput {
            route: Some(Direction::Up),
            ..Default::default()
        };
        tick(&mut board, &input, SIM_DT);
        assert_eq!(board.find_piece(PieceId(1)), Some((Direction::Up, 0)));
        assert!(board.current_piece().is_none());

        // Nothing waiting: route is a no-op
        tick(&mut board, &input, SIM_DT);
        assert_eq!(board.zone(Direction::Up).unwrap().occupied_count(), 1);
    }

    #[test]
    fn test_tick_inversion_applies_before_route() {
        let mut board = Board::new(1, Tuning::calm());
        board.on_piece_arrived(Piece::new(PieceId(1), IdentityKey(0)));
        let input = TickInput {
            route: Some(Direction::Up),
            inversion: Some((false, true)),
            ..Default::default()
        };
        tick(&mut board, &input, SIM_DT);
        assert_eq!(board.find_piece(PieceId(1)), Some((Direction::Down, 0)));
    }

    #[test]
    fn test_determinism() {
        // Two boards with the same seed see identical event streams
        let tuning = Tuning {
            freeze_chance: 0.5,
            shuffle_interval_secs: 1.0,
            ..Tuning::default()
        };
        let mut board1 = Board::new(99999, tuning.clone());
        let mut board2 = Board::new(99999, tuning);

        for step in 0..600u32 {
            let input = TickInput {
                route: Some(Direction::ZONES[(step % 4) as usize]),
                ..Default::default()
            };
            for board in [&mut board1, &mut board2] {
                if board.current_piece().is_none() {
                    board.on_piece_arrived(Piece::new(PieceId(step), IdentityKey((step % 3) as u16)));
                }
                tick(board, &input, 0.1);
            }
            assert_eq!(board1.drain_events(), board2.drain_events());
        }
    }
}
