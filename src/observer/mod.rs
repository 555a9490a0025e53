//! Read-only observation of a running navigator.
//!
//! Observers cannot mutate or steer the planner. The driver hands each one the
//! step outcome plus a snapshot after every committed step, which is where
//! external collaborators (spike encoders, recorders, progress output) attach.

mod spikes;

pub use spikes::SpikeSchedule;

use crate::grid::Cell;
use crate::navigator::{NavStatus, Navigator, StepOutcome};

/// A read-only snapshot of the navigator between two steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorSnapshot {
    pub current: Cell,
    pub previous: Cell,
    pub status: NavStatus,
    pub backtracking: bool,
    pub steps: u32,
    pub dead_ends: u32,
    pub repeated_iterations: u32,
    pub path_len: usize,
}

pub struct NavigatorAdapter<'a> {
    nav: &'a Navigator,
}

impl<'a> NavigatorAdapter<'a> {
    pub fn new(nav: &'a Navigator) -> Self {
        Self { nav }
    }

    pub fn snapshot(&self) -> NavigatorSnapshot {
        let state = self.nav.state();
        NavigatorSnapshot {
            current: state.current(),
            previous: state.previous(),
            status: state.status(),
            backtracking: state.backtracking(),
            steps: state.steps(),
            dead_ends: state.dead_ends(),
            repeated_iterations: state.repeated_iterations(),
            path_len: state.path().len(),
        }
    }
}

/// Receives every step of a run, in order.
pub trait StepObserver {
    fn on_step(&mut self, outcome: &StepOutcome, snapshot: &NavigatorSnapshot);

    fn on_finish(&mut self, _status: NavStatus) {}

    /// Checked at each step boundary; returning `true` aborts the run there.
    fn should_stop(&self) -> bool {
        false
    }
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _outcome: &StepOutcome, _snapshot: &NavigatorSnapshot) {}
}

/// Stops a run after a fixed number of steps.
#[derive(Debug, Clone, Copy)]
pub struct StepBudget {
    remaining: u32,
}

impl StepBudget {
    pub fn new(steps: u32) -> Self {
        Self { remaining: steps }
    }
}

impl StepObserver for StepBudget {
    fn on_step(&mut self, _outcome: &StepOutcome, _snapshot: &NavigatorSnapshot) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    fn should_stop(&self) -> bool {
        self.remaining == 0
    }
}
