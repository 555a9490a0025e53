use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{NavError, Result};

/// 1-based linear cell index: `y * width + x + 1`.
///
/// This is the representation obstacle lists and the path history use.
pub type LinearIndex = u32;

/// A grid cell, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// `|dx| + |dy|`.
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(u32, u32)> for Cell {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl From<[u32; 2]> for Cell {
    fn from([x, y]: [u32; 2]) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Static bounds and obstacle knowledge for one run.
///
/// Immutable after construction. Obstacles are given as 1-based linear
/// indices and kept as a per-cell mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    w: u32,
    h: u32,
    obstacle_mask: Vec<bool>,
}

impl GridWorld {
    /// Largest accepted `width * height`. Per-cell buffers are allocated up front.
    pub const MAX_CELLS: u32 = 1 << 22;

    pub fn new(w: u32, h: u32, obstacles: &[LinearIndex]) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(NavError::config(format!(
                "grid dimensions must be positive, got {w}x{h}"
            )));
        }
        let cells = w
            .checked_mul(h)
            .filter(|&n| n <= Self::MAX_CELLS)
            .ok_or_else(|| {
                NavError::config(format!(
                    "grid {w}x{h} exceeds the {} cell limit",
                    Self::MAX_CELLS
                ))
            })?;

        let mut obstacle_mask = vec![false; cells as usize];
        for &idx in obstacles {
            if idx == 0 || idx > cells {
                return Err(NavError::config(format!(
                    "obstacle index {idx} outside 1..={cells}"
                )));
            }
            obstacle_mask[(idx - 1) as usize] = true;
        }

        Ok(Self {
            w,
            h,
            obstacle_mask,
        })
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    pub fn cell_count(&self) -> usize {
        self.obstacle_mask.len()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.w && cell.y < self.h
    }

    /// Out-of-bounds cells are never obstacles.
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.obstacle_mask[self.offset(cell)]
    }

    /// Obstacle linear indices in ascending order.
    pub fn obstacles(&self) -> Vec<LinearIndex> {
        self.obstacle_mask
            .iter()
            .enumerate()
            .filter(|(_, blocked)| **blocked)
            .map(|(i, _)| i as LinearIndex + 1)
            .collect()
    }

    /// The adjacent cell in `dir`, or `None` at the border (no wrap-around).
    pub fn neighbour(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let next = match dir {
            Direction::Up => Cell::new(cell.x, cell.y.checked_sub(1)?),
            Direction::Left => Cell::new(cell.x.checked_sub(1)?, cell.y),
            Direction::Right => Cell::new(cell.x.checked_add(1)?, cell.y),
            Direction::Down => Cell::new(cell.x, cell.y.checked_add(1)?),
        };
        self.in_bounds(next).then_some(next)
    }

    pub fn linear_index(&self, cell: Cell) -> LinearIndex {
        cell.y * self.w + cell.x + 1
    }

    /// Inverse of [`GridWorld::linear_index`].
    pub fn cell_at(&self, idx: LinearIndex) -> Option<Cell> {
        if idx == 0 || idx as usize > self.cell_count() {
            return None;
        }
        let i = idx - 1;
        Some(Cell::new(i % self.w, i / self.w))
    }

    /// Row-major offset into per-cell buffers. Caller guarantees bounds.
    pub(crate) fn offset(&self, cell: Cell) -> usize {
        (cell.y as usize) * (self.w as usize) + (cell.x as usize)
    }

    /// Checks that `cell` can serve as a start or end point.
    pub(crate) fn check_endpoint(&self, role: &str, cell: Cell) -> Result<()> {
        if !self.in_bounds(cell) {
            return Err(NavError::config(format!(
                "{role} cell {cell} outside {}x{} grid",
                self.w, self.h
            )));
        }
        if self.is_obstacle(cell) {
            return Err(NavError::config(format!(
                "{role} cell {cell} is an obstacle"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_index_round_trips_through_cell_at() {
        let world = GridWorld::new(4, 4, &[]).unwrap();
        assert_eq!(world.linear_index(Cell::new(0, 0)), 1);
        assert_eq!(world.linear_index(Cell::new(2, 2)), 11);
        assert_eq!(world.cell_at(11), Some(Cell::new(2, 2)));
        assert_eq!(world.cell_at(16), Some(Cell::new(3, 3)));
        assert_eq!(world.cell_at(0), None);
        assert_eq!(world.cell_at(17), None);
    }

    #[test]
    fn obstacles_use_one_based_indices() {
        let world = GridWorld::new(4, 4, &[11, 11, 1]).unwrap();
        assert!(world.is_obstacle(Cell::new(2, 2)));
        assert!(world.is_obstacle(Cell::new(0, 0)));
        assert!(!world.is_obstacle(Cell::new(1, 0)));
        assert!(!world.is_obstacle(Cell::new(9, 9)));
        assert_eq!(world.obstacles(), vec![1, 11]);
    }

    #[test]
    fn rejects_bad_construction() {
        assert!(matches!(
            GridWorld::new(0, 3, &[]),
            Err(NavError::Configuration(_))
        ));
        assert!(matches!(
            GridWorld::new(3, 3, &[0]),
            Err(NavError::Configuration(_))
        ));
        assert!(matches!(
            GridWorld::new(3, 3, &[10]),
            Err(NavError::Configuration(_))
        ));
        assert!(GridWorld::new(3, 3, &[9]).is_ok());
        assert!(GridWorld::new(u32::MAX, 2, &[]).is_err());
    }

    #[test]
    fn oversized_grids_are_a_configuration_error() {
        assert!(matches!(
            GridWorld::new(65536, 65535, &[]),
            Err(NavError::Configuration(_))
        ));
        assert!(GridWorld::new(GridWorld::MAX_CELLS + 1, 1, &[]).is_err());
        assert!(GridWorld::new(2048, 2048, &[]).is_ok());
    }

    #[test]
    fn neighbours_stop_at_the_border() {
        let world = GridWorld::new(3, 2, &[]).unwrap();
        let corner = Cell::new(0, 0);
        assert_eq!(world.neighbour(corner, Direction::Up), None);
        assert_eq!(world.neighbour(corner, Direction::Left), None);
        assert_eq!(
            world.neighbour(corner, Direction::Right),
            Some(Cell::new(1, 0))
        );
        assert_eq!(
            world.neighbour(corner, Direction::Down),
            Some(Cell::new(0, 1))
        );
        assert_eq!(world.neighbour(Cell::new(2, 1), Direction::Right), None);
        assert_eq!(world.neighbour(Cell::new(2, 1), Direction::Down), None);
    }

    #[test]
    fn endpoints_must_be_free_and_in_bounds() {
        let world = GridWorld::new(4, 4, &[11]).unwrap();
        assert!(world.check_endpoint("start", Cell::new(3, 3)).is_ok());
        assert!(world.check_endpoint("start", Cell::new(4, 0)).is_err());
        assert!(world.check_endpoint("end", Cell::new(2, 2)).is_err());
    }
}
