//! Level session: lives, goal and win/lose
//!
//! Sits on top of the board and reacts to its events. The board knows nothing
//! about levels or lives.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_CAPACITY;
use crate::sim::{Board, GameEvent};

/// Lives at the start of every level
pub const MAX_LIVES: u8 = 3;

/// Per-level layout and difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub capacity: usize,
    pub target_matches: u32,
    pub start_frozen: usize,
    pub key_count: u16,
    pub fake_chance: f64,
    pub special_chance: f64,
}

impl LevelConfig {
    /// Procedural config for a 1-based level number
    pub fn for_level(level: u32) -> Self {
        let level = level.max(1);
        Self {
            capacity: DEFAULT_CAPACITY,
            target_matches: 2 + level,
            start_frozen: ((level - 1) / 2) as usize,
            key_count: (2 + level / 3).min(6) as u16,
            fake_chance: (0.05 * (level - 1) as f64).min(0.25),
            special_chance: if level >= 3 { 0.08 } else { 0.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Running,
    Won,
    Lost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub level: u32,
    pub lives: u8,
    pub matches_done: u32,
    pub target_matches: u32,
    pub phase: SessionPhase,
}

impl Session {
    /// Start `level` on the given board
    pub fn start(level: u32, board: &mut Board) -> Self {
        let mut session = Self {
            level: 1,
            lives: MAX_LIVES,
            matches_done: 0,
            target_matches: 1,
            phase: SessionPhase::Running,
        };
        session.start_level(level, board);
        session
    }

    pub fn config(&self) -> LevelConfig {
        LevelConfig::for_level(self.level)
    }

    /// Reset lives and goal, rebuild the zones and re-enable input
    pub fn start_level(&mut self, level: u32, board: &mut Board) {
        let config = LevelConfig::for_level(level);
        self.level = level.max(1);
        self.lives = MAX_LIVES;
        self.matches_done = 0;
        self.target_matches = config.target_matches.max(1);
        self.phase = SessionPhase::Running;

        board.set_input_enabled(true);
        board.set_timers_enabled(true);
        board.setup_zones(config.capacity);
        let frozen = board.apply_start_frozen_count(config.start_frozen);
        log::info!(
            "Level {} started: goal {} matches, {} frozen slots",
            self.level,
            self.target_matches,
            frozen
        );
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// React to one board event
    pub fn handle(&mut self, event: &GameEvent, board: &mut Board) {
        if !self.is_running() {
            return;
        }
        match event {
            GameEvent::ZoneMatched { .. } => {
                self.matches_done += 1;
                if self.matches_done >= self.target_matches {
                    self.phase = SessionPhase::Won;
                    board.set_input_enabled(false);
                    log::info!("Level {} completed", self.level);
                }
            }
            GameEvent::PenaltyIncurred { reason } => {
                self.lives = self.lives.saturating_sub(1);
                log::debug!("Penalty {:?}, {} lives left", reason, self.lives);
                if self.lives == 0 {
                    self.phase = SessionPhase::Lost;
                    board.set_input_enabled(false);
                    log::info!("Level {} failed: all lives lost", self.level);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::{Direction, IdentityKey, PenaltyReason, Piece, PieceId};

    #[test]
    fn test_level_config_scales() {
        let first = LevelConfig::for_level(1);
        let later = LevelConfig::for_level(9);
        assert_eq!(first.start_frozen, 0);
        assert!(later.target_matches > first.target_matches);
        assert!(later.fake_chance <= 0.25);
        assert_eq!(LevelConfig::for_level(0), first);
    }

    #[test]
    fn test_penalties_lose_level() {
        let mut board = Board::new(1, Tuning::calm());
        let mut session = Session::start(1, &mut board);
        let penalty = GameEvent::PenaltyIncurred {
            reason: PenaltyReason::ZoneFull,
        };
        for _ in 0..MAX_LIVES {
            session.handle(&penalty, &mut board);
        }
        assert_eq!(session.phase, SessionPhase::Lost);
        assert!(!board.input_enabled());

        // Further events are ignored once the level is over
        session.handle(&penalty, &mut board);
        assert_eq!(session.lives, 0);
    }

    #[test]
    fn test_matches_win_level() {
        let mut board = Board::new(1, Tuning::calm());
        let mut session = Session::start(1, &mut board);
        board.drain_events();

        let mut next_id = 0;
        while session.is_running() {
            for _ in 0..3 {
                next_id += 1;
                board.on_piece_arrived(Piece::new(PieceId(next_id), IdentityKey(0)));
                board.route(Direction::Left, PieceId(next_id)).unwrap();
            }
            for event in board.drain_events() {
                session.handle(&event, &mut board);
            }
        }
        assert_eq!(session.phase, SessionPhase::Won);
        assert_eq!(session.matches_done, session.target_matches);
        assert!(!board.input_enabled());
    }

    #[test]
    fn test_restart_restores_lives() {
        let mut board = Board::new(1, Tuning::calm());
        let mut session = Session::start(4, &mut board);
        session.lives = 1;
        session.start_level(4, &mut board);
        assert_eq!(session.lives, MAX_LIVES);
        let frozen: usize = board.zones().iter().map(|z| z.frozen_count()).sum();
        assert_eq!(frozen, LevelConfig::for_level(4).start_frozen);
    }
}
