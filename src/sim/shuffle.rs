//! Shuffle scheduler
//!
//! Moves every zone's occupant list to another zone according to a random
//! bijection on the four directions. Frozen slots shrink a zone's usable
//! capacity, so a permutation is only accepted when every target zone can
//! hold everything mapped into it. Otherwise the cycle is skipped and the
//! board is left untouched.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::timer::Timer;
use crate::consts::ZONE_COUNT;
use crate::error::{EngineError, Result};

/// Source zone index -> target zone index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permutation(pub [usize; ZONE_COUNT]);

impl Permutation {
    pub const IDENTITY: Permutation = Permutation([0, 1, 2, 3]);

    /// 4-cycle used when a draw comes out as the identity
    pub const ROTATION: Permutation = Permutation([1, 2, 3, 0]);

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn target_index(&self, source: usize) -> usize {
        self.0[source]
    }

    /// Zone that receives the pieces of `source`
    pub fn target(&self, source: Direction) -> Direction {
        source
            .index()
            .and_then(|i| Direction::from_index(self.0[i]))
            .unwrap_or(Direction::None)
    }

    /// Pieces each target zone would receive
    pub fn tentative_counts(&self, counts: &[usize; ZONE_COUNT]) -> [usize; ZONE_COUNT] {
        let mut landing = [0; ZONE_COUNT];
        for (source, count) in counts.iter().enumerate() {
            landing[self.0[source]] += count;
        }
        landing
    }

    /// Every target can hold what lands in it
    pub fn is_feasible(
        &self,
        counts: &[usize; ZONE_COUNT],
        capacities: &[usize; ZONE_COUNT],
    ) -> bool {
        self.tentative_counts(counts)
            .iter()
            .zip(capacities)
            .all(|(landing, cap)| landing <= cap)
    }
}

/// Fisher-Yates draw over the four zones, never the identity
pub fn random_permutation(rng: &mut Pcg32) -> Permutation {
    let mut order = [0, 1, 2, 3];
    for i in (1..ZONE_COUNT).rev() {
        let j = rng.random_range(0..=i);
        order.swap(i, j);
    }
    let perm = Permutation(order);
    if perm.is_identity() {
        Permutation::ROTATION
    } else {
        perm
    }
}

/// Draw permutations until one fits, up to `max_attempts`
pub fn find_feasible(
    rng: &mut Pcg32,
    counts: &[usize; ZONE_COUNT],
    capacities: &[usize; ZONE_COUNT],
    max_attempts: u32,
) -> Result<Permutation> {
    for _ in 0..max_attempts {
        let perm = random_permutation(rng);
        if perm.is_feasible(counts, capacities) {
            return Ok(perm);
        }
    }
    Err(EngineError::InfeasibleShuffle {
        attempts: max_attempts,
    })
}

/// In-flight migration. Input stays suspended until it ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Migration {
    remaining: f32,
    /// Input state to restore when the migration completes
    restore_input: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleScheduler {
    pub timer: Timer,
    pub chance: f64,
    pub max_attempts: u32,
    pub migration_secs: f32,
    active: Option<Migration>,
}

impl ShuffleScheduler {
    pub fn new(interval_secs: f32, chance: f64, max_attempts: u32, migration_secs: f32) -> Self {
        Self {
            timer: Timer::new(interval_secs),
            chance: chance.clamp(0.0, 1.0),
            max_attempts: max_attempts.max(1),
            migration_secs: migration_secs.max(0.0),
            active: None,
        }
    }

    pub fn roll(&self, rng: &mut Pcg32) -> bool {
        rng.random_bool(self.chance)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start the migration span, remembering the input state to restore
    pub fn begin(&mut self, restore_input: bool) {
        self.active = Some(Migration {
            remaining: self.migration_secs,
            restore_input,
        });
    }

    /// Update the input state restored at the end of the span
    pub fn set_restore_input(&mut self, enabled: bool) {
        if let Some(migration) = &mut self.active {
            migration.restore_input = enabled;
        }
    }

    /// Advance the migration span. Returns the input state to restore once it ends.
    pub fn advance(&mut self, dt: f32) -> Option<bool> {
        let migration = self.active.as_mut()?;
        migration.remaining -= dt;
        if migration.remaining > 0.0 {
            return None;
        }
        self.finish()
    }

    /// End the span now
    pub fn finish(&mut self) -> Option<bool> {
        self.active.take().map(|m| m.restore_input)
    }
}
