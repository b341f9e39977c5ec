//! Gesture classification
//!
//! Turns a pointer/touch drag into a routing direction or a tap. Pointer
//! capture itself belongs to the host platform.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum drag length (pixels) to count as a swipe
    pub min_swipe_distance: f32,
    /// Dominant axis must exceed the other by this factor
    pub axis_bias: f32,
    /// Drags shorter than this are taps
    pub tap_max_distance: f32,
    /// Y grows upward (false for screen coordinates)
    pub y_up: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_swipe_distance: 60.0,
            axis_bias: 1.2,
            tap_max_distance: 12.0,
            y_up: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Swipe(Direction),
    Tap,
    /// Ambiguous or too short to be a swipe, too long to be a tap
    None,
}

/// Classify a drag from its start-to-end delta
pub fn classify_gesture(delta: Vec2, config: &GestureConfig) -> Gesture {
    let length = delta.length();
    if length <= config.tap_max_distance {
        return Gesture::Tap;
    }
    if length < config.min_swipe_distance {
        return Gesture::None;
    }

    let (ax, ay) = (delta.x.abs(), delta.y.abs());
    if ax >= ay * config.axis_bias {
        let dir = if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        };
        return Gesture::Swipe(dir);
    }
    if ay >= ax * config.axis_bias {
        let upward = if config.y_up { delta.y > 0.0 } else { delta.y < 0.0 };
        let dir = if upward { Direction::Up } else { Direction::Down };
        return Gesture::Swipe(dir);
    }
    Gesture::None
}
