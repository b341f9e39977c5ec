//! Engine tuning and difficulty presets
//!
//! Loaded from JSON by the host; any missing field keeps its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Relaxed,
    #[default]
    Normal,
    Frantic,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Relaxed => "Relaxed",
            Difficulty::Normal => "Normal",
            Difficulty::Frantic => "Frantic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(Difficulty::Relaxed),
            "normal" => Some(Difficulty::Normal),
            "frantic" | "hard" => Some(Difficulty::Frantic),
            _ => None,
        }
    }

    /// Freeze roll probability for this preset
    pub fn freeze_chance(&self) -> f64 {
        match self {
            Difficulty::Relaxed => 0.2,
            Difficulty::Normal => FREEZE_CHANCE,
            Difficulty::Frantic => 0.6,
        }
    }

    /// Seconds between shuffle attempts
    pub fn shuffle_interval_secs(&self) -> f32 {
        match self {
            Difficulty::Relaxed => 20.0,
            Difficulty::Normal => SHUFFLE_INTERVAL_SECS,
            Difficulty::Frantic => 8.0,
        }
    }
}

/// Timing and probability knobs for the zone/slot engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub difficulty: Difficulty,
    /// Slots per zone
    pub capacity: usize,

    // === Freeze scheduler ===
    pub freeze_interval_secs: f32,
    pub freeze_chance: f64,

    // === Shuffle scheduler ===
    pub shuffle_interval_secs: f32,
    pub shuffle_chance: f64,
    pub shuffle_max_attempts: u32,
    /// Input stays suspended this long after a shuffle
    pub shuffle_migration_secs: f32,

    // === Pieces ===
    pub frozen_piece_health: u8,
    /// Empty slots frozen when the board is created
    pub start_frozen_slots: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            capacity: DEFAULT_CAPACITY,

            freeze_interval_secs: FREEZE_INTERVAL_SECS,
            freeze_chance: FREEZE_CHANCE,

            shuffle_interval_secs: SHUFFLE_INTERVAL_SECS,
            shuffle_chance: SHUFFLE_CHANCE,
            shuffle_max_attempts: SHUFFLE_MAX_ATTEMPTS,
            shuffle_migration_secs: SHUFFLE_MIGRATION_SECS,

            frozen_piece_health: FROZEN_PIECE_HEALTH,
            start_frozen_slots: 0,
        }
    }
}

impl Tuning {
    /// Create tuning from a difficulty preset
    pub fn from_preset(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            freeze_chance: difficulty.freeze_chance(),
            shuffle_interval_secs: difficulty.shuffle_interval_secs(),
            ..Self::default()
        }
    }

    /// Tuning with every scheduler turned off (tests, tutorials)
    pub fn calm() -> Self {
        Self {
            freeze_chance: 0.0,
            shuffle_chance: 0.0,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validated())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp every field into a range the engine can run with
    pub fn validated(mut self) -> Self {
        const MIN_INTERVAL: f32 = 0.05;

        self.capacity = self.capacity.clamp(1, MAX_CAPACITY);
        self.freeze_chance = self.freeze_chance.clamp(0.0, 1.0);
        self.shuffle_chance = self.shuffle_chance.clamp(0.0, 1.0);
        self.freeze_interval_secs = self.freeze_interval_secs.max(MIN_INTERVAL);
        self.shuffle_interval_secs = self.shuffle_interval_secs.max(MIN_INTERVAL);
        self.shuffle_max_attempts = self.shuffle_max_attempts.max(1);
        self.shuffle_migration_secs = self.shuffle_migration_secs.max(0.0);
        self.frozen_piece_health = self.frozen_piece_health.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "capacity": 4, "freeze_chance": 0.9 }"#).unwrap();
        assert_eq!(tuning.capacity, 4);
        assert!((tuning.freeze_chance - 0.9).abs() < 1e-9);
        assert_eq!(tuning.shuffle_max_attempts, SHUFFLE_MAX_ATTEMPTS);
    }

    #[test]
    fn test_validated_clamps() {
        let tuning = Tuning::from_json(
            r#"{ "capacity": 0, "freeze_chance": 3.0, "shuffle_max_attempts": 0 }"#,
        )
        .unwrap();
        assert_eq!(tuning.capacity, 1);
        assert_eq!(tuning.freeze_chance, 1.0);
        assert_eq!(tuning.shuffle_max_attempts, 1);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Tuning::from_json("{ capacity: ").is_err());
    }

    #[test]
    fn test_preset_roundtrip() {
        for preset in [Difficulty::Relaxed, Difficulty::Normal, Difficulty::Frantic] {
            assert_eq!(Difficulty::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Frantic));
        assert_eq!(Difficulty::from_str("nope"), None);

        let frantic = Tuning::from_preset(Difficulty::Frantic);
        assert!(frantic.freeze_chance > Tuning::default().freeze_chance);
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let tuning = Tuning::from_preset(Difficulty::Relaxed);
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
