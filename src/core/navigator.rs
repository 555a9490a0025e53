//! Greedy cell-by-cell navigator with dead-end backtracking.
//!
//! Each [`Navigator::step`] scans the four neighbours of the current cell,
//! advances to the free neighbour closest to the target (Manhattan distance),
//! or, when none is free, pops the path history and retreats one cell. The run
//! ends when the target is reached or when the dead-end threshold / safety cap
//! marks it unachievable.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::annotator::{CellClassification, ClassificationEvent};
use crate::direction::Direction;
use crate::error::{NavError, Result};
use crate::grid::{Cell, GridWorld, LinearIndex};

/// Tunables for a navigation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavigatorConfig {
    /// Value of the shared iteration counter at which a dead end abandons the run.
    pub max_repeated_iteration: u32,
    /// Value of the shared iteration counter at which the run is forced to stop.
    pub safety_cap: u32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            max_repeated_iteration: 3,
            safety_cap: 200,
        }
    }
}

impl NavigatorConfig {
    pub fn with_max_repeated_iteration(mut self, v: u32) -> Self {
        self.max_repeated_iteration = v;
        self
    }

    pub fn with_safety_cap(mut self, v: u32) -> Self {
        self.safety_cap = v;
        self
    }

    /// Validate the configuration, returning an error message if invalid.
    pub fn validate(&self) -> core::result::Result<(), &'static str> {
        if self.max_repeated_iteration == 0 {
            return Err("max_repeated_iteration must be >= 1");
        }
        if self.safety_cap == 0 {
            return Err("safety_cap must be >= 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NavStatus {
    Exploring,
    Backtracking,
    /// The current cell is the target.
    Finished,
    /// No continuation under the dead-end policy, or the safety cap fired.
    Unachievable,
}

impl NavStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, NavStatus::Finished | NavStatus::Unachievable)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NavStatus::Exploring => "exploring",
            NavStatus::Backtracking => "backtracking",
            NavStatus::Finished => "finished",
            NavStatus::Unachievable => "unachievable",
        }
    }
}

/// Mutable planner state. Only [`Navigator::step`] writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState {
    current: Cell,
    previous: Cell,
    /// Linear indices of occupied cells. A stack: retreating pops, it never dedups.
    path: Vec<LinearIndex>,
    backtracking: bool,
    repeated_iterations: u32,
    dead_ends: u32,
    steps: u32,
    status: NavStatus,
}

impl NavigatorState {
    fn new(start: Cell, start_idx: LinearIndex) -> Self {
        Self {
            current: start,
            previous: start,
            path: vec![start_idx],
            backtracking: false,
            repeated_iterations: 0,
            dead_ends: 0,
            steps: 0,
            status: NavStatus::Exploring,
        }
    }

    pub fn current(&self) -> Cell {
        self.current
    }

    pub fn previous(&self) -> Cell {
        self.previous
    }

    pub fn path(&self) -> &[LinearIndex] {
        &self.path
    }

    /// Once set, neighbours are never considered free again for this run.
    pub fn backtracking(&self) -> bool {
        self.backtracking
    }

    pub fn repeated_iterations(&self) -> u32 {
        self.repeated_iterations
    }

    pub fn dead_ends(&self) -> u32 {
        self.dead_ends
    }

    /// Committed moves so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn status(&self) -> NavStatus {
        self.status
    }

    pub fn finished(&self) -> bool {
        self.status == NavStatus::Finished
    }

    pub fn unachievable(&self) -> bool {
        self.status == NavStatus::Unachievable
    }
}

/// Result of a single [`Navigator::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// `None` when the step ended the run without moving.
    pub command: Option<Direction>,
    pub status: NavStatus,
    pub free_neighbours: usize,
    pub dead_end: bool,
    /// Map writes in the order they were produced.
    pub events: Vec<ClassificationEvent>,
}

impl StepOutcome {
    fn idle(status: NavStatus) -> Self {
        Self {
            command: None,
            status,
            free_neighbours: 0,
            dead_end: false,
            events: Vec::new(),
        }
    }
}

enum Plan {
    Advance(Cell),
    Retreat(Cell),
    Abandon(&'static str),
}

/// The stateful planner for one run. Owns its world; runs never share state.
#[derive(Debug, Clone)]
pub struct Navigator {
    world: GridWorld,
    start: Cell,
    end: Cell,
    cfg: NavigatorConfig,
    state: NavigatorState,
}

impl Navigator {
    pub fn new(world: GridWorld, start: Cell, end: Cell, cfg: NavigatorConfig) -> Result<Self> {
        cfg.validate().map_err(NavError::config)?;
        world.check_endpoint("start", start)?;
        world.check_endpoint("end", end)?;
        if start == end {
            return Err(NavError::config(format!(
                "start and end coincide at {start}"
            )));
        }

        let state = NavigatorState::new(start, world.linear_index(start));
        Ok(Self {
            world,
            start,
            end,
            cfg,
            state,
        })
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn end(&self) -> Cell {
        self.end
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.cfg
    }

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    pub fn status(&self) -> NavStatus {
        self.state.status
    }

    /// Advances the run by one cell.
    ///
    /// On a terminal navigator this is a no-op that returns no command.
    /// An [`NavError::AdjacencyViolation`] leaves the state untouched and is
    /// fatal for the run.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.state.status.is_terminal() {
            return Ok(StepOutcome::idle(self.state.status));
        }

        let mut events = Vec::with_capacity(6);
        let (free, n_free) = self.scan_neighbours(&mut events);
        let free = &free[..n_free];

        let plan = match nearest_to_target(self.end, free) {
            Some(next) => Plan::Advance(next),
            None => self.plan_dead_end(),
        };

        let (next, dead_end) = match plan {
            Plan::Advance(next) => (next, false),
            Plan::Retreat(next) => (next, true),
            Plan::Abandon(reason) => {
                self.state.repeated_iterations += 1;
                self.state.dead_ends += 1;
                self.state.status = NavStatus::Unachievable;
                info!(
                    cell = %self.state.current,
                    dead_ends = self.state.dead_ends,
                    reason,
                    "navigation unachievable"
                );
                return Ok(StepOutcome {
                    command: None,
                    status: self.state.status,
                    free_neighbours: 0,
                    dead_end: true,
                    events,
                });
            }
        };

        let command =
            Direction::between(self.state.current, next).ok_or(NavError::AdjacencyViolation {
                from: self.state.current,
                to: next,
            })?;

        if dead_end {
            self.state.repeated_iterations += 1;
            self.state.dead_ends += 1;
            self.state.backtracking = true;
            self.state.path.pop();
            debug!(
                cell = %self.state.current,
                back_to = %next,
                repeated = self.state.repeated_iterations,
                "dead end, backtracking"
            );
        }

        self.commit_move(next, n_free, &mut events);
        debug!(
            to = %next,
            command = command.as_str(),
            free = n_free,
            status = self.state.status.as_str(),
            "step"
        );

        Ok(StepOutcome {
            command: Some(command),
            status: self.state.status,
            free_neighbours: n_free,
            dead_end,
            events,
        })
    }

    /// Classifies the in-bounds neighbours in scan order.
    ///
    /// Returns the free ones (not an obstacle, not in the path history, and
    /// only while not backtracking) in a fixed buffer plus their count.
    fn scan_neighbours(&self, events: &mut Vec<ClassificationEvent>) -> ([Cell; 4], usize) {
        let here = self.state.current;
        let mut free = [here; 4];
        let mut n = 0usize;

        for dir in Direction::SCAN_ORDER {
            let Some(cell) = self.world.neighbour(here, dir) else {
                continue;
            };
            if self.world.is_obstacle(cell) {
                events.push(ClassificationEvent::new(cell, CellClassification::Obstacle));
            } else if !self.state.backtracking
                && !self.state.path.contains(&self.world.linear_index(cell))
            {
                events.push(ClassificationEvent::new(cell, CellClassification::Free));
                free[n] = cell;
                n += 1;
            }
        }

        (free, n)
    }

    fn plan_dead_end(&self) -> Plan {
        if self.state.repeated_iterations + 1 >= self.cfg.max_repeated_iteration {
            return Plan::Abandon("dead-end threshold reached");
        }
        let len = self.state.path.len();
        if len <= 1 {
            return Plan::Abandon("path history exhausted");
        }
        match self.world.cell_at(self.state.path[len - 2]) {
            Some(cell) => Plan::Retreat(cell),
            None => Plan::Abandon("path history exhausted"),
        }
    }

    fn commit_move(&mut self, next: Cell, n_free: usize, events: &mut Vec<ClassificationEvent>) {
        let departed = self.state.current;
        self.state.previous = departed;
        self.state.current = next;
        self.state.path.push(self.world.linear_index(next));
        self.state.steps += 1;

        let departed_class = if n_free > 1 {
            CellClassification::Crossroad
        } else {
            CellClassification::PathStep
        };
        events.push(ClassificationEvent::new(departed, departed_class));

        if next == self.end {
            events.push(ClassificationEvent::new(next, CellClassification::End));
            self.state.status = NavStatus::Finished;
            info!(steps = self.state.steps, "navigation finished");
        } else {
            events.push(ClassificationEvent::new(next, CellClassification::PathStep));
            self.state.status = if self.state.backtracking {
                NavStatus::Backtracking
            } else {
                NavStatus::Exploring
            };
        }

        self.state.repeated_iterations += 1;
        if self.state.status != NavStatus::Finished
            && self.state.repeated_iterations >= self.cfg.safety_cap
        {
            warn!(cap = self.cfg.safety_cap, "safety cap reached, abandoning run");
            self.state.status = NavStatus::Unachievable;
        }
    }
}

/// The candidate closest to `target`; on equal distance the later candidate wins.
pub fn nearest_to_target(target: Cell, candidates: &[Cell]) -> Option<Cell> {
    let mut best: Option<(u32, Cell)> = None;
    for &cell in candidates {
        let d = cell.manhattan(target);
        if best.map_or(true, |(best_d, _)| d <= best_d) {
            best = Some((d, cell));
        }
    }
    best.map(|(_, cell)| cell)
}
