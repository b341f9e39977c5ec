//! Routing directions and swap inversion

use serde::{Deserialize, Serialize};

use crate::consts::ZONE_COUNT;

/// Routing direction. `None` is never a placement target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All zone directions, in storage order
    pub const ZONES: [Direction; ZONE_COUNT] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Storage index for a zone direction
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            Direction::None => None,
            Direction::Up => Some(0),
            Direction::Down => Some(1),
            Direction::Left => Some(2),
            Direction::Right => Some(3),
        }
    }

    /// Inverse of `index`
    #[inline]
    pub fn from_index(index: usize) -> Option<Direction> {
        Self::ZONES.get(index).copied()
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::None => "None",
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

/// Swap-inversion flags applied to incoming route commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inversion {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Inversion {
    pub fn new(horizontal: bool, vertical: bool) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Map a commanded direction to the zone it actually targets
    pub fn apply(&self, direction: Direction) -> Direction {
        if (self.horizontal && direction.is_horizontal())
            || (self.vertical && direction.is_vertical())
        {
            direction.opposite()
        } else {
            direction
        }
    }
}
