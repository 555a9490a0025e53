#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grid::Cell;

/// The command alphabet emitted once per step.
///
/// Encoding is fixed for downstream consumers: 0=up, 1=left, 2=right, 3=down.
/// Up decreases `y`, left decreases `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Left = 1,
    Right = 2,
    Down = 3,
}

impl Direction {
    /// Neighbour scan order. Later entries win distance ties.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }

    /// `(dx, dy)` for one step in this direction.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    /// The direction that moves `from` onto `to`, if they are 4-adjacent.
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        let dx = i64::from(to.x) - i64::from(from.x);
        let dy = i64::from(to.y) - i64::from(from.y);
        Self::SCAN_ORDER
            .into_iter()
            .find(|d| d.offset() == (dx, dy))
    }
}
