//! Property tests for the zone/slot engine.
//!
//! Random command/tick sequences must keep:
//! - occupied count <= capacity and no slot both frozen and occupied
//! - every piece in exactly one place (queue, one slot, or gone)
//! - at most one current piece, and no refill request while one is current
//! - shuffles conserving the number of resident pieces

use std::collections::HashSet;

use proptest::prelude::*;
use swipe_sort::sim::{Board, Direction, GameEvent, Slot};
use swipe_sort::{Spawner, Tuning};

#[derive(Debug, Clone)]
enum Command {
    Route(u8),
    TapHead,
    TapResident(u8),
    Freeze,
    Shuffle,
    Advance(u8),
    Invert(bool, bool),
    ToggleInput(bool),
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => (0u8..5).prop_map(Command::Route),
        1 => Just(Command::TapHead),
        2 => any::<u8>().prop_map(Command::TapResident),
        1 => Just(Command::Freeze),
        1 => Just(Command::Shuffle),
        2 => (1u8..40).prop_map(Command::Advance),
        1 => (any::<bool>(), any::<bool>()).prop_map(|(h, v)| Command::Invert(h, v)),
        1 => any::<bool>().prop_map(Command::ToggleInput),
    ]
}

fn resident_count(board: &Board) -> usize {
    board.zones().iter().map(|z| z.occupied_count()).sum()
}

fn assert_invariants(board: &Board) {
    let mut seen = HashSet::new();
    for zone in board.zones() {
        assert!(zone.occupied_count() <= zone.capacity());
        // Occupants are packed ahead of any empty slot
        let mut gap = false;
        for slot in zone.slots() {
            match slot {
                Slot::Empty => gap = true,
                Slot::Occupied(piece) => {
                    assert!(!gap, "occupant after an empty slot");
                    assert!(seen.insert(piece.id), "piece in two slots");
                }
                Slot::Frozen => {}
            }
        }
    }
    let snapshot = board.snapshot();
    for piece in &snapshot.queue {
        assert!(seen.insert(piece.id), "piece queued and resident");
    }
    assert!(snapshot.queue.len() <= 1);
    if board.current_piece().is_some() {
        assert!(!board.is_awaiting_arrival());
    }
}

proptest! {
    #[test]
    fn random_play_keeps_invariants(
        seed in any::<u64>(),
        capacity in 1usize..5,
        commands in prop::collection::vec(command(), 1..120),
    ) {
        let tuning = Tuning {
            capacity,
            freeze_chance: 0.5,
            shuffle_interval_secs: 2.0,
            ..Tuning::default()
        };
        let mut board = Board::new(seed, tuning);
        let mut spawner = Spawner::new(seed, 2).with_chances(0.2, 0.1);

        for cmd in commands {
            for event in board.drain_events() {
                if event == GameEvent::ArrivalRequested {
                    prop_assert!(board.current_piece().is_none());
                    board.on_piece_arrived(spawner.spawn());
                }
            }

            let residents = resident_count(&board);
            match cmd {
                Command::Route(d) => {
                    if let Some(id) = board.current_piece().map(|p| p.id) {
                        let dir = Direction::from_index(d as usize).unwrap_or(Direction::None);
                        let _ = board.route(dir, id);
                    }
                }
                Command::TapHead => {
                    if let Some(id) = board.current_piece().map(|p| p.id) {
                        let _ = board.tap_remove(id);
                    }
                }
                Command::TapResident(n) => {
                    let ids: Vec<_> = board
                        .zones()
                        .iter()
                        .flat_map(|z| z.occupants().map(|p| p.id))
                        .collect();
                    if !ids.is_empty() {
                        let _ = board.tap_remove(ids[n as usize % ids.len()]);
                    }
                }
                Command::Freeze => {
                    board.try_freeze();
                }
                Command::Shuffle => {
                    if board.try_shuffle().is_ok() {
                        prop_assert_eq!(resident_count(&board), residents);
                    }
                }
                Command::Advance(tenths) => board.advance(tenths as f32 * 0.1),
                Command::Invert(h, v) => board.set_inversion(h, v),
                Command::ToggleInput(on) => board.set_input_enabled(on),
            }

            assert_invariants(&board);
        }
    }
}
