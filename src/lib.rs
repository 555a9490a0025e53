//! # gridnav
//!
//! A deterministic grid navigator: it explores a grid cell by cell, greedily
//! steps toward a target by Manhattan distance, backtracks out of dead ends
//! and emits one command (up, left, right, down) per step.
//!
//! ## Quick Start
//!
//! ```
//! use gridnav::prelude::*;
//!
//! // 4x4 grid with an obstacle at (2, 2) (linear index 11)
//! let world = GridWorld::new(4, 4, &[11]).unwrap();
//! let mut nav = Navigator::new(
//!     world,
//!     Cell::new(2, 0),
//!     Cell::new(0, 3),
//!     NavigatorConfig::default(),
//! )
//! .unwrap();
//!
//! while !nav.status().is_terminal() {
//!     let outcome = nav.step().unwrap();
//!     if let Some(cmd) = outcome.command {
//!         println!("{}", cmd.code());
//!     }
//! }
//! assert_eq!(nav.status(), NavStatus::Finished);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialization of configs and reports, JSON loading
//! - `parallel`: Run batch experiments on the rayon thread pool
//!
//! ## Modules
//!
//! - [`grid`]: Cells, bounds and obstacles
//! - [`navigator`]: The planner state machine
//! - [`annotator`]: Output-map classification
//! - [`driver`]: Run-to-completion loop
//! - [`report`]: Map rendering and result files
//! - [`observer`]: Read-only observation adapters
//! - [`experiments`]: Preset and JSON-defined experiments, batch runs

#[path = "core/error.rs"]
pub mod error;

#[path = "core/grid.rs"]
pub mod grid;

#[path = "core/direction.rs"]
pub mod direction;

#[path = "core/navigator.rs"]
pub mod navigator;

#[path = "core/annotator.rs"]
pub mod annotator;

#[path = "core/driver.rs"]
pub mod driver;

#[path = "core/report.rs"]
pub mod report;

pub mod experiments;
pub mod observer;

/// Prelude module for convenient imports.
///
/// ```
/// use gridnav::prelude::*;
/// ```
pub mod prelude {
    pub use crate::annotator::{
        CellClassification, ClassificationEvent, ClassificationGrid, MapAnnotator,
    };
    pub use crate::direction::Direction;
    pub use crate::driver::{navigate, run_to_end, NavigationRun};
    pub use crate::error::{NavError, Result};
    pub use crate::experiments::ExperimentConfig;
    pub use crate::grid::{Cell, GridWorld, LinearIndex};
    pub use crate::navigator::{NavStatus, Navigator, NavigatorConfig, StepOutcome};
    pub use crate::observer::{NoopObserver, SpikeSchedule, StepObserver};
}
