//! Experiment definitions: grid layout, endpoints and navigator tunables.
//!
//! The four presets reproduce the reference maps the planner was developed
//! against. Custom experiments load from JSON.

pub mod batch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
#[cfg(feature = "serde")]
use std::path::Path;

use crate::driver::{navigate, NavigationRun};
use crate::error::{NavError, Result};
use crate::grid::{Cell, GridWorld, LinearIndex};
use crate::navigator::NavigatorConfig;
use crate::observer::StepObserver;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimentConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// `[x, y]`
    pub start: [u32; 2],
    /// `[x, y]`
    pub end: [u32; 2],
    /// 1-based linear indices (`y * width + x + 1`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub obstacles: Vec<LinearIndex>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub navigator: NavigatorConfig,
}

impl ExperimentConfig {
    /// Number of built-in presets; ids are `0..PRESET_COUNT`.
    pub const PRESET_COUNT: u32 = 4;

    /// Built-in layouts:
    /// - 0: 4x4 open map (robot demo)
    /// - 1: 4x4 map with one obstacle on the direct route
    /// - 2: 6x6 map with scattered obstacles
    /// - 3: 6x6 map whose obstacles block every Manhattan-shortest route
    pub fn preset(id: u32) -> Option<Self> {
        let (name, w, h, start, end, obstacles): (&str, u32, u32, [u32; 2], [u32; 2], Vec<u32>) =
            match id {
                0 => ("robotDemo", 4, 4, [2, 0], [0, 3], vec![]),
                1 => ("test4x4simple", 4, 4, [2, 0], [0, 3], vec![11]),
                2 => (
                    "test6x6simple",
                    6,
                    6,
                    [2, 0],
                    [5, 5],
                    vec![5, 12, 15, 23, 30, 34],
                ),
                3 => (
                    "test6x6complex",
                    6,
                    6,
                    [2, 0],
                    [5, 5],
                    vec![5, 9, 12, 15, 21, 23, 28, 30],
                ),
                _ => return None,
            };
        Some(Self {
            name: name.to_string(),
            width: w,
            height: h,
            start,
            end,
            obstacles,
            navigator: NavigatorConfig::default(),
        })
    }

    pub fn presets() -> Vec<Self> {
        (0..Self::PRESET_COUNT).filter_map(Self::preset).collect()
    }

    pub fn start_cell(&self) -> Cell {
        Cell::from(self.start)
    }

    pub fn end_cell(&self) -> Cell {
        Cell::from(self.end)
    }

    pub fn world(&self) -> Result<GridWorld> {
        GridWorld::new(self.width, self.height, &self.obstacles)
    }

    pub fn run(&self, observer: &mut dyn StepObserver) -> Result<NavigationRun> {
        navigate(
            self.world()?,
            self.start_cell(),
            self.end_cell(),
            self.navigator,
            observer,
        )
    }

    /// The name doubles as a result directory, so it must be one plain path component.
    pub fn check_name(&self) -> Result<()> {
        let name = self.name.as_str();
        let bad_char = |c: char| c == '/' || c == '\\' || c == '\0';
        if name.is_empty() || name == "." || name == ".." || name.contains(bad_char) {
            return Err(NavError::config(format!(
                "experiment name {name:?} is not a plain directory name"
            )));
        }
        Ok(())
    }

    /// Checks every name and rejects two experiments sharing one.
    pub fn check_names(configs: &[Self]) -> Result<()> {
        let mut seen = HashSet::new();
        for cfg in configs {
            cfg.check_name()?;
            if !seen.insert(cfg.name.as_str()) {
                return Err(NavError::config(format!(
                    "experiment name {:?} appears more than once",
                    cfg.name
                )));
            }
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    #[cfg(feature = "serde")]
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reads either a single experiment object or an array of them.
    #[cfg(feature = "serde")]
    pub fn load_many(path: &Path) -> Result<Vec<Self>> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(ExperimentConfig),
            Many(Vec<ExperimentConfig>),
        }

        let text = std::fs::read_to_string(path)?;
        Ok(match serde_json::from_str(&text)? {
            OneOrMany::One(cfg) => vec![cfg],
            OneOrMany::Many(cfgs) => cfgs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;
    use crate::navigator::NavStatus;
    use crate::observer::NoopObserver;

    fn run_preset(id: u32) -> NavigationRun {
        ExperimentConfig::preset(id)
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap()
    }

    #[test]
    fn presets_are_complete() {
        let presets = ExperimentConfig::presets();
        assert_eq!(presets.len(), 4);
        assert!(ExperimentConfig::preset(4).is_none());
        assert_eq!(presets[1].obstacles, vec![11]);
        for p in &presets {
            assert!(p.world().is_ok(), "{} has an invalid world", p.name);
        }
    }

    #[test]
    fn robot_demo_walks_the_open_map() {
        let r = run_preset(0);
        assert!(r.finished());
        assert_eq!(r.command_codes(), vec![3, 3, 3, 1, 1]);
    }

    #[test]
    fn simple_six_by_six_reaches_the_corner() {
        let r = run_preset(2);
        assert!(r.finished());
        assert_eq!(r.command_codes(), vec![3, 2, 3, 3, 3, 2, 3, 2]);
        assert_eq!(r.dead_ends, 0);
    }

    #[test]
    fn complex_six_by_six_is_unachievable() {
        let r = run_preset(3);
        assert_eq!(r.status, NavStatus::Unachievable);
        assert_eq!(r.command_codes(), vec![2, 3, 3, 3]);
        assert_eq!(r.dead_ends, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_config_fills_navigator_defaults() {
        let cfg = ExperimentConfig::from_json_str(
            r#"{"name":"custom","width":3,"height":3,"start":[1,1],"end":[0,0]}"#,
        )
        .unwrap();
        assert!(cfg.obstacles.is_empty());
        assert_eq!(cfg.navigator, NavigatorConfig::default());

        let partial = ExperimentConfig::from_json_str(
            r#"{"name":"capped","width":3,"height":3,"start":[1,1],"end":[0,0],
                "navigator":{"safety_cap":1}}"#,
        )
        .unwrap();
        assert_eq!(partial.navigator.safety_cap, 1);
        assert_eq!(partial.navigator.max_repeated_iteration, 3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn malformed_json_is_reported() {
        let err = ExperimentConfig::from_json_str("{\"name\": 1}").unwrap_err();
        assert!(matches!(err, NavError::Json(_)));
    }

    #[test]
    fn names_must_be_distinct_plain_components() {
        let presets = ExperimentConfig::presets();
        assert!(ExperimentConfig::check_names(&presets).is_ok());

        for bad in ["../x", "a/b", "a\\b", "..", ".", ""] {
            let mut cfg = ExperimentConfig::preset(0).unwrap();
            cfg.name = bad.to_string();
            assert!(
                matches!(cfg.check_name(), Err(NavError::Configuration(_))),
                "{bad:?} accepted"
            );
        }

        let mut twice = presets.clone();
        twice.push(ExperimentConfig::preset(2).unwrap());
        assert!(matches!(
            ExperimentConfig::check_names(&twice),
            Err(NavError::Configuration(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn oversized_json_grid_is_rejected_before_allocating() {
        let cfg = ExperimentConfig::from_json_str(
            r#"{"name":"huge","width":65536,"height":65535,"start":[0,0],"end":[1,0]}"#,
        )
        .unwrap();
        let err = cfg.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, NavError::Configuration(_)));
    }

    #[test]
    fn invalid_endpoint_surfaces_before_any_step() {
        let mut cfg = ExperimentConfig::preset(1).unwrap();
        cfg.start = [2, 2];
        let err = cfg.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, NavError::Configuration(_)));
    }
}
