//! Freeze scheduler
//!
//! Every interval, rolls once against `chance`. On success a random zone and
//! slot are chosen; the board freezes the slot only if it is empty. A miss is
//! simply a quiet tick, there is no retry.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::timer::Timer;
use super::zone::Zone;
use crate::consts::ZONE_COUNT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreezeScheduler {
    pub timer: Timer,
    pub chance: f64,
}

impl FreezeScheduler {
    pub fn new(interval_secs: f32, chance: f64) -> Self {
        Self {
            timer: Timer::new(interval_secs),
            chance: chance.clamp(0.0, 1.0),
        }
    }

    /// Probability roll for one timer fire
    pub fn roll(&self, rng: &mut Pcg32) -> bool {
        rng.random_bool(self.chance)
    }

    /// Random zone and slot, regardless of what the slot holds
    pub fn pick_candidate(rng: &mut Pcg32, capacity: usize) -> Option<(Direction, usize)> {
        if capacity == 0 {
            return None;
        }
        let direction = Direction::ZONES[rng.random_range(0..ZONE_COUNT)];
        let index = rng.random_range(0..capacity);
        Some((direction, index))
    }

    /// Choose up to `count` distinct empty slots across all zones
    pub fn pick_start_slots(
        rng: &mut Pcg32,
        zones: &[Zone; ZONE_COUNT],
        count: usize,
    ) -> Vec<(Direction, usize)> {
        let mut eligible: Vec<(Direction, usize)> = zones
            .iter()
            .flat_map(|zone| {
                zone.slots()
                    .iter()
                    .enumerate()
                    .filter(|(_, slot)| slot.is_empty())
                    .map(move |(index, _)| (zone.direction(), index))
            })
            .collect();

        let count = count.min(eligible.len());
        // Partial Fisher-Yates: the first `count` entries become the sample
        for i in 0..count {
            let j = rng.random_range(i..eligible.len());
            eligible.swap(i, j);
        }
        eligible.truncate(count);
        eligible
    }
}
