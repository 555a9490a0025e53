//! Runs a navigator to completion and collects everything a report needs.

use tracing::info;

use crate::annotator::{ClassificationEvent, ClassificationGrid, MapAnnotator};
use crate::direction::Direction;
use crate::error::Result;
use crate::grid::{Cell, GridWorld, LinearIndex};
use crate::navigator::{NavStatus, Navigator, NavigatorConfig};
use crate::observer::{NavigatorAdapter, StepObserver};

/// Outcome of one complete (or aborted) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRun {
    pub start: Cell,
    pub end: Cell,
    pub status: NavStatus,
    /// True when an observer stopped the run before a terminal status.
    pub aborted: bool,
    pub commands: Vec<Direction>,
    /// Start cell followed by every cell moved onto.
    pub trail: Vec<Cell>,
    /// The navigator's final path history.
    pub path: Vec<LinearIndex>,
    pub initial_map: ClassificationGrid,
    pub final_map: ClassificationGrid,
    pub events: Vec<ClassificationEvent>,
    pub steps: u32,
    pub dead_ends: u32,
}

impl NavigationRun {
    pub fn finished(&self) -> bool {
        self.status == NavStatus::Finished
    }

    pub fn command_codes(&self) -> Vec<u8> {
        self.commands.iter().map(|c| c.code()).collect()
    }
}

/// Builds a navigator for `world` and runs it until it stops.
pub fn navigate(
    world: GridWorld,
    start: Cell,
    end: Cell,
    cfg: NavigatorConfig,
    observer: &mut dyn StepObserver,
) -> Result<NavigationRun> {
    let navigator = Navigator::new(world, start, end, cfg)?;
    run_to_end(navigator, observer)
}

/// Steps `navigator` until it reports a terminal status or `observer` asks to stop.
///
/// Aborts only happen between steps. An adjacency violation ends the run with
/// the error.
pub fn run_to_end(
    mut navigator: Navigator,
    observer: &mut dyn StepObserver,
) -> Result<NavigationRun> {
    let start = navigator.start();
    let end = navigator.end();
    let mut annotator = MapAnnotator::new(navigator.world(), start, end);
    let initial_map = annotator.grid().clone();

    let mut commands = Vec::new();
    let mut trail = vec![start];
    let mut events = Vec::new();
    let mut aborted = false;

    while !navigator.status().is_terminal() {
        if observer.should_stop() {
            aborted = true;
            break;
        }

        let outcome = navigator.step()?;
        annotator.apply_all(&outcome.events);
        events.extend_from_slice(&outcome.events);
        if let Some(command) = outcome.command {
            commands.push(command);
            trail.push(navigator.state().current());
        }

        let snapshot = NavigatorAdapter::new(&navigator).snapshot();
        observer.on_step(&outcome, &snapshot);
    }

    let status = navigator.status();
    observer.on_finish(status);
    info!(
        status = status.as_str(),
        aborted,
        steps = navigator.state().steps(),
        dead_ends = navigator.state().dead_ends(),
        "run complete"
    );

    let state = navigator.state();
    Ok(NavigationRun {
        start,
        end,
        status,
        aborted,
        commands,
        trail,
        path: state.path().to_vec(),
        initial_map,
        final_map: annotator.into_grid(),
        events,
        steps: state.steps(),
        dead_ends: state.dead_ends(),
    })
}
