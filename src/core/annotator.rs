#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, GridWorld};

/// Per-cell classification reported at the end of a run.
///
/// The integer codes are consumed by external tooling and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum CellClassification {
    #[default]
    Unvisited = 0,
    Start = 1,
    End = 2,
    PathStep = 3,
    Crossroad = 4,
    Free = 5,
    Obstacle = 6,
}

impl CellClassification {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Classes that no later event may overwrite.
    fn is_sticky(self) -> bool {
        matches!(
            self,
            CellClassification::Start | CellClassification::End | CellClassification::Obstacle
        )
    }
}

/// One write into the output map, emitted by the navigator in step order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassificationEvent {
    pub cell: Cell,
    pub class: CellClassification,
}

impl ClassificationEvent {
    pub fn new(cell: Cell, class: CellClassification) -> Self {
        Self { cell, class }
    }
}

/// Row-major grid of classifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationGrid {
    w: u32,
    h: u32,
    cells: Vec<CellClassification>,
}

impl ClassificationGrid {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            cells: vec![CellClassification::Unvisited; (w as usize) * (h as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    /// Out-of-bounds reads as `Unvisited`.
    pub fn get(&self, cell: Cell) -> CellClassification {
        if cell.x >= self.w || cell.y >= self.h {
            return CellClassification::Unvisited;
        }
        self.cells[self.idx(cell)]
    }

    pub fn count(&self, class: CellClassification) -> usize {
        self.cells.iter().filter(|&&c| c == class).count()
    }

    /// Integer codes, one row per `y`.
    pub fn code_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.w.max(1) as usize)
            .map(|row| row.iter().map(|c| c.code()).collect())
            .collect()
    }

    fn idx(&self, cell: Cell) -> usize {
        (cell.y as usize) * (self.w as usize) + (cell.x as usize)
    }

    fn set(&mut self, cell: Cell, class: CellClassification) {
        if cell.x >= self.w || cell.y >= self.h {
            return;
        }
        let i = self.idx(cell);
        self.cells[i] = class;
    }
}

/// Folds a navigator's classification events into a [`ClassificationGrid`].
///
/// Precedence rules:
/// - `Start`, `End` and `Obstacle` are permanent once written.
/// - `Free` only marks cells that are still `Unvisited`.
/// - `PathStep` and `Crossroad` overwrite anything else, so a crossroad that is
///   entered again is reported as a path step.
#[derive(Debug, Clone)]
pub struct MapAnnotator {
    grid: ClassificationGrid,
}

impl MapAnnotator {
    /// Starts from the initial map: `Start` and `End` placed, all else unvisited.
    pub fn new(world: &GridWorld, start: Cell, end: Cell) -> Self {
        let mut grid = ClassificationGrid::new(world.width(), world.height());
        grid.set(start, CellClassification::Start);
        grid.set(end, CellClassification::End);
        Self { grid }
    }

    pub fn apply(&mut self, event: ClassificationEvent) {
        let current = self.grid.get(event.cell);
        if current.is_sticky() {
            return;
        }
        let next = match event.class {
            CellClassification::Free if current != CellClassification::Unvisited => return,
            CellClassification::Start | CellClassification::Unvisited => return,
            other => other,
        };
        self.grid.set(event.cell, next);
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a ClassificationEvent>) {
        for e in events {
            self.apply(*e);
        }
    }

    pub fn grid(&self) -> &ClassificationGrid {
        &self.grid
    }

    pub fn into_grid(self) -> ClassificationGrid {
        self.grid
    }

    /// Rebuilds a final map from a recorded event stream.
    pub fn replay(
        world: &GridWorld,
        start: Cell,
        end: Cell,
        events: &[ClassificationEvent],
    ) -> ClassificationGrid {
        let mut annotator = Self::new(world, start, end);
        annotator.apply_all(events);
        annotator.into_grid()
    }
}
