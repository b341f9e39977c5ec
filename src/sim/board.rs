//! Zone/slot engine
//!
//! `Board` owns the four zones, the arrival queue and both schedulers. Every
//! mutation commits immediately; renderers replay the emitted events at their
//! own pace. While a shuffle migration is in flight the board refuses routing,
//! taps and freezes.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::{Direction, Inversion};
use super::event::{GameEvent, PenaltyReason};
use super::freeze::FreezeScheduler;
use super::matching;
use super::piece::{Piece, PieceId};
use super::queue::ArrivalQueue;
use super::shuffle::{self, Permutation, ShuffleScheduler};
use super::zone::{Rejected, Zone};
use crate::consts::{MAX_ADVANCE_SECS, MAX_CAPACITY, ZONE_COUNT};
use crate::error::{EngineError, Result};
use crate::settings::Tuning;

/// What a successful route did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Regular piece stored; `matched` if the zone cleared as a result
    Placed {
        direction: Direction,
        index: usize,
        matched: bool,
    },
    /// Special piece unlocked a frozen slot
    Unfroze { direction: Direction, index: usize },
    /// Special piece found no frozen slot and was discarded
    Wasted { direction: Direction },
}

/// What a tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Queue head thrown away
    Discarded { penalized: bool },
    /// Frozen resident lost one health
    Damaged { health: u8 },
    /// Frozen resident broke and was removed
    Broken,
    /// Unfrozen resident removed
    Removed { penalized: bool },
}

/// Serializable view of the board for hosts and tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub zones: Vec<Zone>,
    pub queue: Vec<Piece>,
    pub input_enabled: bool,
    pub shuffling: bool,
    pub inversion: Inversion,
}

pub struct Board {
    tuning: Tuning,
    zones: [Zone; ZONE_COUNT],
    queue: ArrivalQueue,
    input_enabled: bool,
    timers_enabled: bool,
    inversion: Inversion,
    freeze: FreezeScheduler,
    shuffle: ShuffleScheduler,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Board {
    /// Create a board with the given seed and tuning
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated();
        let mut board = Self {
            zones: Direction::ZONES.map(|d| Zone::new(d, tuning.capacity)),
            queue: ArrivalQueue::new(),
            input_enabled: true,
            timers_enabled: true,
            inversion: Inversion::default(),
            freeze: FreezeScheduler::new(tuning.freeze_interval_secs, tuning.freeze_chance),
            shuffle: ShuffleScheduler::new(
                tuning.shuffle_interval_secs,
                tuning.shuffle_chance,
                tuning.shuffle_max_attempts,
                tuning.shuffle_migration_secs,
            ),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        };

        log::info!(
            "Board created: seed={}, capacity={}, difficulty={}",
            seed,
            board.tuning.capacity,
            board.tuning.difficulty.as_str()
        );

        let start_frozen = board.tuning.start_frozen_slots;
        board.apply_start_frozen_count(start_frozen);
        board.request_arrival();
        board
    }

    // === Queries ===

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn zone(&self, direction: Direction) -> Option<&Zone> {
        direction.index().map(|i| &self.zones[i])
    }

    pub fn zones(&self) -> &[Zone; ZONE_COUNT] {
        &self.zones
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.queue.head()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_awaiting_arrival(&self) -> bool {
        self.queue.is_awaiting()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn is_shuffling(&self) -> bool {
        self.shuffle.is_active()
    }

    pub fn timers_enabled(&self) -> bool {
        self.timers_enabled
    }

    pub fn inversion(&self) -> Inversion {
        self.inversion
    }

    /// Zone and slot currently holding the piece
    pub fn find_piece(&self, id: PieceId) -> Option<(Direction, usize)> {
        self.zones
            .iter()
            .find_map(|zone| zone.find(id).map(|index| (zone.direction(), index)))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            zones: self.zones.to_vec(),
            queue: self.queue.iter().cloned().collect(),
            input_enabled: self.input_enabled,
            shuffling: self.is_shuffling(),
            inversion: self.inversion,
        }
    }

    /// Take every event published since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Commands ===

    pub fn set_input_enabled(&mut self, enabled: bool) {
        if self.shuffle.is_active() {
            self.shuffle.set_restore_input(enabled);
        } else {
            self.input_enabled = enabled;
        }
    }

    pub fn set_inversion(&mut self, horizontal: bool, vertical: bool) {
        self.inversion = Inversion::new(horizontal, vertical);
    }

    pub fn set_timers_enabled(&mut self, enabled: bool) {
        self.timers_enabled = enabled;
    }

    /// Rebuild every zone with a new capacity. All pieces and freezes are dropped.
    pub fn setup_zones(&mut self, capacity: usize) {
        let capacity = capacity.clamp(1, MAX_CAPACITY);
        self.flush();
        self.tuning.capacity = capacity;
        self.zones = Direction::ZONES.map(|d| Zone::new(d, capacity));
        log::info!("Zones set up with capacity {}", capacity);
        self.events.push(GameEvent::BoardReset);
        self.request_arrival();
    }

    /// Empty the queue and every zone without scoring or penalties
    pub fn reset_board(&mut self) {
        self.flush();
        log::info!("Board reset");
        self.events.push(GameEvent::BoardReset);
        self.request_arrival();
    }

    /// Stop timers and input, then flush. No new arrival is requested.
    pub fn teardown(&mut self) {
        self.timers_enabled = false;
        self.flush();
        self.input_enabled = false;
        log::info!("Board torn down");
        self.events.push(GameEvent::BoardReset);
    }

    /// Deliver a spawned piece
    pub fn on_piece_arrived(&mut self, piece: Piece) {
        if self.queue.contains(piece.id) || self.find_piece(piece.id).is_some() {
            log::warn!("Ignoring duplicate arrival of piece {:?}", piece.id);
            return;
        }
        if self.queue.push(piece.clone()) {
            self.events.push(GameEvent::PieceArrivedForRouting(piece));
        }
    }

    /// Route the current head piece toward `direction` (after inversion)
    pub fn route(&mut self, direction: Direction, id: PieceId) -> Result<RouteOutcome> {
        self.check_input()?;
        if !self.queue.is_head(id) {
            return Err(EngineError::PieceNotFound(id));
        }
        let target = self.inversion.apply(direction);
        let zi = target
            .index()
            .ok_or(EngineError::InvalidDirection(direction))?;
        let piece = self.queue.pop().ok_or(EngineError::PieceNotFound(id))?;

        if piece.special {
            let outcome = self.consume_special(zi, piece);
            self.advance_queue();
            return Ok(outcome);
        }

        let index = match self.zones[zi].try_place(piece) {
            Ok(index) => index,
            Err(Rejected { error, piece }) => {
                log::warn!("Route of {:?} to {:?} rejected: {}", piece.id, target, error);
                self.queue.restore(piece);
                let reason = match error {
                    EngineError::SlotFrozen(_) => PenaltyReason::SlotFrozen,
                    _ => PenaltyReason::ZoneFull,
                };
                self.events.push(GameEvent::PenaltyIncurred { reason });
                return Err(error);
            }
        };

        let health = self.tuning.frozen_piece_health;
        let mut decoy = false;
        if let Some(placed) = self.zones[zi].piece_mut(index) {
            if placed.fake || placed.frozen {
                placed.freeze(health);
                decoy = true;
            }
            let placed = placed.clone();
            log::debug!("Placed {:?} in {}[{}]", placed.id, target.as_str(), index);
            self.events.push(GameEvent::PiecePlaced {
                piece: placed,
                direction: target,
                index,
            });
        }
        if decoy {
            self.events.push(GameEvent::PenaltyIncurred {
                reason: PenaltyReason::DecoyPlaced,
            });
        }

        let matched = self.check_match(zi);
        self.advance_queue();
        Ok(RouteOutcome::Placed {
            direction: target,
            index,
            matched,
        })
    }

    /// Tap a piece: the queue head or a zone resident
    pub fn tap_remove(&mut self, id: PieceId) -> Result<TapOutcome> {
        self.check_input()?;

        if self.queue.is_head(id) {
            if self.queue.head().is_some_and(|p| p.special) {
                return Err(EngineError::PieceNotFound(id));
            }
            let piece = self.queue.pop().ok_or(EngineError::PieceNotFound(id))?;
            let penalized = !piece.fake;
            if penalized {
                self.events.push(GameEvent::PenaltyIncurred {
                    reason: PenaltyReason::GenuineTapped,
                });
            }
            self.events.push(GameEvent::PieceRemoved {
                piece,
                direction: Direction::None,
                index: None,
            });
            self.advance_queue();
            return Ok(TapOutcome::Discarded { penalized });
        }

        let (direction, index) = self.find_piece(id).ok_or(EngineError::PieceNotFound(id))?;
        let zi = direction
            .index()
            .ok_or(EngineError::InvalidDirection(direction))?;
        let resident = self.zones[zi]
            .piece_mut(index)
            .ok_or(EngineError::PieceNotFound(id))?;

        if resident.special {
            return Err(EngineError::PieceNotFound(id));
        }

        if resident.frozen {
            let broken = resident.take_damage();
            let health = resident.health;
            self.events.push(GameEvent::PieceDamaged { piece: id, health });
            if !broken {
                return Ok(TapOutcome::Damaged { health });
            }
            self.remove_resident(zi, index);
            return Ok(TapOutcome::Broken);
        }

        self.events.push(GameEvent::PenaltyIncurred {
            reason: PenaltyReason::ResidentTapped,
        });
        self.remove_resident(zi, index);
        Ok(TapOutcome::Removed { penalized: true })
    }

    /// Freeze a specific empty slot. Returns false if nothing changed.
    pub fn freeze_slot(&mut self, direction: Direction, index: usize) -> Result<bool> {
        if self.is_shuffling() {
            return Err(EngineError::ShuffleInProgress);
        }
        let zi = self.zone_index(direction, index)?;
        let changed = self.zones[zi].freeze(index);
        if changed {
            log::debug!("Froze {}[{}]", direction.as_str(), index);
            self.events.push(GameEvent::SlotFrozen { direction, index });
        }
        Ok(changed)
    }

    /// Clear a frozen slot. Returns false if nothing changed.
    pub fn unfreeze_slot(&mut self, direction: Direction, index: usize) -> Result<bool> {
        if self.is_shuffling() {
            return Err(EngineError::ShuffleInProgress);
        }
        let zi = self.zone_index(direction, index)?;
        Ok(self.unfreeze_and_repack(zi, index))
    }

    /// Freeze up to `count` random empty slots. Returns how many were frozen.
    pub fn apply_start_frozen_count(&mut self, count: usize) -> usize {
        let picked = FreezeScheduler::pick_start_slots(&mut self.rng, &self.zones, count);
        let mut frozen = 0;
        for (direction, index) in picked {
            if let Ok(true) = self.freeze_slot(direction, index) {
                frozen += 1;
            }
        }
        frozen
    }

    /// One freeze scheduler fire: roll, pick, freeze if the slot is empty
    pub fn try_freeze(&mut self) -> Option<(Direction, usize)> {
        if self.is_shuffling() || !self.input_enabled {
            return None;
        }
        if !self.freeze.roll(&mut self.rng) {
            return None;
        }
        let (direction, index) =
            FreezeScheduler::pick_candidate(&mut self.rng, self.tuning.capacity)?;
        match self.freeze_slot(direction, index) {
            Ok(true) => Some((direction, index)),
            _ => None,
        }
    }

    /// One shuffle attempt. The board is untouched unless a feasible permutation is found.
    pub fn try_shuffle(&mut self) -> Result<Permutation> {
        if self.is_shuffling() {
            return Err(EngineError::ShuffleInProgress);
        }
        if !self.input_enabled {
            return Err(EngineError::InputDisabled);
        }

        let counts = self.zones.each_ref().map(Zone::occupied_count);
        let capacities = self.zones.each_ref().map(Zone::non_frozen_capacity);
        let permutation = match shuffle::find_feasible(
            &mut self.rng,
            &counts,
            &capacities,
            self.shuffle.max_attempts,
        ) {
            Ok(p) => p,
            Err(err) => {
                log::debug!("Shuffle skipped: {}", err);
                return Err(err);
            }
        };

        self.shuffle.begin(self.input_enabled);
        self.input_enabled = false;

        let detached = self.zones.each_mut().map(Zone::take_occupants);
        for (source, pieces) in detached.into_iter().enumerate() {
            let target = permutation.target_index(source);
            let overflow = self.zones[target].receive(pieces);
            debug_assert!(overflow.is_empty(), "feasible shuffle overflowed");
        }

        log::info!("Shuffle accepted: {:?}", permutation.0);
        self.events.push(GameEvent::ShuffleStarted { permutation });

        if self.shuffle.migration_secs <= 0.0 {
            self.finish_shuffle();
        }
        Ok(permutation)
    }

    /// Advance timers and any in-flight migration by `dt` seconds.
    /// Non-finite or negative `dt` counts as zero; long spans are capped.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_ADVANCE_SECS)
        } else {
            log::warn!("Ignoring non-finite advance of {}", dt);
            0.0
        };

        if let Some(restore) = self.shuffle.advance(dt) {
            self.input_enabled = restore;
            self.events.push(GameEvent::ShuffleFinished);
        }

        if !self.timers_enabled {
            return;
        }

        for _ in 0..self.freeze.timer.advance(dt) {
            self.try_freeze();
        }
        for _ in 0..self.shuffle.timer.advance(dt) {
            if self.shuffle.roll(&mut self.rng) {
                let _ = self.try_shuffle();
            }
        }
    }

    // === Internals ===

    fn check_input(&self) -> Result<()> {
        if self.is_shuffling() {
            return Err(EngineError::ShuffleInProgress);
        }
        if !self.input_enabled {
            return Err(EngineError::InputDisabled);
        }
        Ok(())
    }

    fn zone_index(&self, direction: Direction, index: usize) -> Result<usize> {
        let zi = direction
            .index()
            .ok_or(EngineError::InvalidDirection(direction))?;
        if index >= self.zones[zi].capacity() {
            return Err(EngineError::InvalidSlot { direction, index });
        }
        Ok(zi)
    }

    fn request_arrival(&mut self) {
        if self.queue.request_refill() {
            self.events.push(GameEvent::ArrivalRequested);
        }
    }

    /// Announce the next head, or ask for one
    fn advance_queue(&mut self) {
        match self.queue.head() {
            Some(head) => {
                let head = head.clone();
                self.events.push(GameEvent::PieceArrivedForRouting(head));
            }
            None => self.request_arrival(),
        }
    }

    fn consume_special(&mut self, zi: usize, piece: Piece) -> RouteOutcome {
        let direction = self.zones[zi].direction();
        match self.zones[zi].first_frozen() {
            Some(index) => {
                self.unfreeze_and_repack(zi, index);
                log::debug!(
                    "Special {:?} unfroze {}[{}]",
                    piece.id,
                    direction.as_str(),
                    index
                );
                self.events.push(GameEvent::SpecialConsumed {
                    piece: piece.id,
                    direction,
                    index,
                });
                RouteOutcome::Unfroze { direction, index }
            }
            None => {
                self.events.push(GameEvent::SpecialWasted {
                    piece: piece.id,
                    direction,
                });
                RouteOutcome::Wasted { direction }
            }
        }
    }

    /// Unfreeze a slot and announce any residents that slid down to fill it
    fn unfreeze_and_repack(&mut self, zi: usize, index: usize) -> bool {
        let direction = self.zones[zi].direction();
        let before = self.zones[zi].layout();
        if !self.zones[zi].unfreeze(index) {
            return false;
        }
        self.events.push(GameEvent::SlotUnfrozen { direction, index });
        let layout = self.zones[zi].layout();
        if occupant_order_changed(&before, &layout) {
            log::debug!("Zone {} repacked after unfreeze", direction.as_str());
            self.events.push(GameEvent::ZoneRepacked { direction, layout });
        }
        true
    }

    fn remove_resident(&mut self, zi: usize, index: usize) {
        let direction = self.zones[zi].direction();
        if let Some(piece) = self.zones[zi].remove_at(index) {
            self.events.push(GameEvent::PieceRemoved {
                piece,
                direction,
                index: Some(index),
            });
        }
        self.check_match(zi);
    }

    /// Clear the zone if it is a full homogeneous set
    fn check_match(&mut self, zi: usize) -> bool {
        let Some(key) = matching::evaluate(&self.zones[zi]) else {
            return false;
        };
        let direction = self.zones[zi].direction();
        let pieces = self.zones[zi]
            .take_occupants()
            .into_iter()
            .map(|p| p.id)
            .collect();
        log::info!("Zone {:?} matched key {:?}", direction, key);
        self.events.push(GameEvent::ZoneMatched {
            direction,
            key,
            pieces,
        });
        true
    }

    fn finish_shuffle(&mut self) {
        if let Some(restore) = self.shuffle.finish() {
            self.input_enabled = restore;
            self.events.push(GameEvent::ShuffleFinished);
        }
    }

    /// Drop all pieces, freezes and any migration, silently
    fn flush(&mut self) {
        if let Some(restore) = self.shuffle.finish() {
            self.input_enabled = restore;
        }
        self.queue.flush();
        for zone in &mut self.zones {
            zone.clear();
        }
        self.freeze.timer.reset();
        self.shuffle.timer.reset();
    }
}

/// True if any resident now sits at a different index
fn occupant_order_changed(before: &[Option<PieceId>], after: &[Option<PieceId>]) -> bool {
    after
        .iter()
        .enumerate()
        .any(|(i, id)| id.is_some() && before.get(i) != Some(id))
}
