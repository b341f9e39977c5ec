//! Piece spawner
//!
//! Answers `ArrivalRequested` with a fresh piece drawn from the level's key
//! pool. Some pieces come out as decoys or specials.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{IdentityKey, Piece, PieceId};

pub struct Spawner {
    rng: Pcg32,
    keys: Vec<IdentityKey>,
    pub fake_chance: f64,
    pub special_chance: f64,
    next_id: u32,
}

impl Spawner {
    /// Spawner over keys `0..key_count`
    pub fn new(seed: u64, key_count: u16) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            keys: (0..key_count.max(1)).map(IdentityKey).collect(),
            fake_chance: 0.0,
            special_chance: 0.0,
            next_id: 1,
        }
    }

    pub fn with_chances(mut self, fake_chance: f64, special_chance: f64) -> Self {
        self.fake_chance = fake_chance.clamp(0.0, 1.0);
        self.special_chance = special_chance.clamp(0.0, 1.0);
        self
    }

    /// Replace the key pool (new level)
    pub fn set_key_count(&mut self, key_count: u16) {
        self.keys = (0..key_count.max(1)).map(IdentityKey).collect();
    }

    pub fn keys(&self) -> &[IdentityKey] {
        &self.keys
    }

    fn next_piece_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn(&mut self) -> Piece {
        let id = self.next_piece_id();
        let key = self.keys[self.rng.random_range(0..self.keys.len())];

        if self.rng.random_bool(self.special_chance) {
            return Piece::special(id, key);
        }
        if self.rng.random_bool(self.fake_chance) {
            return Piece::fake(id, key);
        }
        Piece::new(id, key)
    }
}
