//! Swipe Sort - a real-time four-way sorting puzzle
//!
//! Core modules:
//! - `sim`: Deterministic zone/slot engine (placement, matches, freezes, shuffles)
//! - `settings`: Data-driven tuning and difficulty presets
//! - `input`: Swipe/tap gesture classification
//! - `spawn`: Seeded piece spawner
//! - `session`: Level goals and lives driven by engine events

pub mod error;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;
pub mod spawn;

pub use error::{EngineError, Result};
pub use session::{LevelConfig, Session, SessionPhase};
pub use settings::{Difficulty, Tuning};
pub use spawn::Spawner;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the runner feeds into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Longest span a single `Board::advance` call will simulate
    pub const MAX_ADVANCE_SECS: f32 = 60.0;

    /// Number of directional zones (Up, Down, Left, Right)
    pub const ZONE_COUNT: usize = 4;
    /// Slots per zone unless a level says otherwise
    pub const DEFAULT_CAPACITY: usize = 3;
    /// Largest zone the engine will set up
    pub const MAX_CAPACITY: usize = 8;

    /// Taps needed to break a frozen piece
    pub const FROZEN_PIECE_HEALTH: u8 = 3;

    /// Freeze scheduler defaults
    pub const FREEZE_INTERVAL_SECS: f32 = 5.0;
    pub const FREEZE_CHANCE: f64 = 0.4;

    /// Shuffle scheduler defaults
    pub const SHUFFLE_INTERVAL_SECS: f32 = 12.0;
    pub const SHUFFLE_CHANCE: f64 = 1.0;
    pub const SHUFFLE_MAX_ATTEMPTS: u32 = 25;
    /// How long input stays suspended while pieces migrate
    pub const SHUFFLE_MIGRATION_SECS: f32 = 0.45;
}
