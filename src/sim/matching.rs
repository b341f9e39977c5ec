//! Match detection
//!
//! A zone matches only when every slot is occupied and every occupant is a
//! regular piece sharing one identity key.

use super::piece::IdentityKey;
use super::zone::Zone;

/// Key of the completed set, or `None` if the zone does not match
pub fn evaluate(zone: &Zone) -> Option<IdentityKey> {
    if zone.capacity() == 0 || !zone.is_full() {
        return None;
    }

    let mut occupants = zone.occupants();
    let first = occupants.next()?;
    if !first.can_match() {
        return None;
    }

    occupants
        .all(|p| p.can_match() && p.key == first.key)
        .then_some(first.key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::direction::Direction;
    use crate::sim::piece::{Piece, PieceId};

    fn zone_with(keys: &[u16]) -> Zone {
        let mut zone = Zone::new(Direction::Right, 3);
        for (i, key) in keys.iter().enumerate() {
            zone.try_place(Piece::new(PieceId(i as u32), IdentityKey(*key)))
                .unwrap();
        }
        zone
    }

    #[test]
    fn test_full_homogeneous_zone_matches() {
        assert_eq!(evaluate(&zone_with(&[4, 4, 4])), Some(IdentityKey(4)));
    }

    #[test]
    fn test_mixed_keys_do_not_match() {
        assert_eq!(evaluate(&zone_with(&[1, 1, 2])), None);
    }

    #[test]
    fn test_partial_zone_does_not_match() {
        assert_eq!(evaluate(&zone_with(&[1, 1])), None);
    }

    #[test]
    fn test_frozen_occupant_blocks_match() {
        let mut zone = zone_with(&[1, 1, 1]);
        zone.piece_mut(1).unwrap().freeze(3);
        assert_eq!(evaluate(&zone), None);
    }

    #[test]
    fn test_special_occupant_blocks_match() {
        let mut zone = Zone::new(Direction::Up, 2);
        zone.try_place(Piece::new(PieceId(1), IdentityKey(0))).unwrap();
        zone.try_place(Piece::special(PieceId(2), IdentityKey(0)))
            .unwrap();
        assert_eq!(evaluate(&zone), None);
    }

    #[test]
    fn test_zone_with_frozen_slot_never_matches() {
        let mut zone = Zone::new(Direction::Up, 3);
        zone.freeze(2);
        zone.try_place(Piece::new(PieceId(1), IdentityKey(0))).unwrap();
        zone.try_place(Piece::new(PieceId(2), IdentityKey(0))).unwrap();
        assert_eq!(evaluate(&zone), None);
    }
}
