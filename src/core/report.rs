use std::fs;
use std::io::Write;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::annotator::ClassificationGrid;
use crate::driver::NavigationRun;
use crate::error::Result;
use crate::grid::LinearIndex;
use crate::navigator::NavStatus;

pub const INITIAL_MAP_FORMATTED: &str = "initial_map_formatted.txt";
pub const INITIAL_MAP_LIST: &str = "initial_map.txt";
pub const FINAL_MAP_FORMATTED: &str = "final_map_formatted.txt";
pub const FINAL_MAP_LIST: &str = "final_map.txt";
pub const COMMANDS_FILE: &str = "commands.txt";
pub const RUN_JSON: &str = "run.json";

/// A classification grid as plain integer codes, one row per `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapReport {
    pub width: u32,
    pub height: u32,
    pub rows: Vec<Vec<u8>>,
}

impl MapReport {
    pub fn from_grid(grid: &ClassificationGrid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            rows: grid.code_rows(),
        }
    }

    /// Matrix layout, one row per line:
    ///
    /// ```text
    /// [[0 5 1 5]
    ///  [5 4 4 5]]
    /// ```
    pub fn formatted(&self) -> String {
        let mut out = String::from("[");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push_str("\n ");
            }
            out.push('[');
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            out.push_str(&cells.join(" "));
            out.push(']');
        }
        out.push(']');
        out
    }

    /// Nested-list layout on a single line: `[[0, 5, 1, 5], [5, 4, 4, 5]]`.
    pub fn list_text(&self) -> String {
        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
                format!("[{}]", cells.join(", "))
            })
            .collect();
        format!("[{}]", rows.join(", "))
    }
}

/// Everything downstream tooling reads about a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunReport {
    pub name: String,
    pub status: NavStatus,
    pub aborted: bool,
    pub commands: Vec<u8>,
    pub path: Vec<LinearIndex>,
    pub steps: u32,
    pub dead_ends: u32,
    pub initial_map: MapReport,
    pub final_map: MapReport,
}

impl RunReport {
    pub fn new(name: impl Into<String>, run: &NavigationRun) -> Self {
        Self {
            name: name.into(),
            status: run.status,
            aborted: run.aborted,
            commands: run.command_codes(),
            path: run.path.clone(),
            steps: run.steps,
            dead_ends: run.dead_ends,
            initial_map: MapReport::from_grid(&run.initial_map),
            final_map: MapReport::from_grid(&run.final_map),
        }
    }

    /// Command codes as a list: `[3, 1, 3]`.
    pub fn commands_text(&self) -> String {
        let codes: Vec<String> = self.commands.iter().map(|c| c.to_string()).collect();
        format!("[{}]", codes.join(", "))
    }
}

/// Writes the map and command files for `report` into `dir`, creating it if needed.
pub fn write_run(dir: &Path, report: &RunReport) -> Result<()> {
    fs::create_dir_all(dir)?;

    write_text(&dir.join(INITIAL_MAP_FORMATTED), &report.initial_map.formatted())?;
    write_text(&dir.join(INITIAL_MAP_LIST), &report.initial_map.list_text())?;
    write_text(&dir.join(FINAL_MAP_FORMATTED), &report.final_map.formatted())?;
    write_text(&dir.join(FINAL_MAP_LIST), &report.final_map.list_text())?;
    write_text(&dir.join(COMMANDS_FILE), &report.commands_text())?;

    #[cfg(feature = "serde")]
    {
        let json = serde_json::to_string_pretty(report)?;
        write_text(&dir.join(RUN_JSON), &json)?;
    }

    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    let mut f = fs::File::create(path)?;
    f.write_all(text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::navigate;
    use crate::grid::{Cell, GridWorld};
    use crate::navigator::NavigatorConfig;
    use crate::observer::NoopObserver;

    fn sample_run() -> NavigationRun {
        let world = GridWorld::new(4, 4, &[11]).unwrap();
        navigate(
            world,
            Cell::new(2, 0),
            Cell::new(0, 3),
            NavigatorConfig::default(),
            &mut NoopObserver,
        )
        .unwrap()
    }

    #[test]
    fn formatted_and_list_layouts() {
        let report = MapReport::from_grid(&sample_run().final_map);
        assert_eq!(
            report.formatted(),
            "[[0 5 1 5]\n [5 4 4 5]\n [5 4 6 0]\n [2 4 5 0]]"
        );
        assert_eq!(
            report.list_text(),
            "[[0, 5, 1, 5], [5, 4, 4, 5], [5, 4, 6, 0], [2, 4, 5, 0]]"
        );
    }

    #[test]
    fn run_report_carries_commands() {
        let report = RunReport::new("test4x4simple", &sample_run());
        assert_eq!(report.status, NavStatus::Finished);
        assert_eq!(report.commands_text(), "[3, 1, 3, 3, 1]");
        assert_eq!(report.initial_map.rows[0], vec![0, 0, 1, 0]);
    }

    #[test]
    fn write_run_creates_the_result_files() {
        let dir = std::env::temp_dir().join(format!("gridnav_report_{}", std::process::id()));
        let report = RunReport::new("test4x4simple", &sample_run());
        write_run(&dir, &report).unwrap();

        let final_list = fs::read_to_string(dir.join(FINAL_MAP_LIST)).unwrap();
        assert_eq!(final_list, report.final_map.list_text());
        let commands = fs::read_to_string(dir.join(COMMANDS_FILE)).unwrap();
        assert_eq!(commands, "[3, 1, 3, 3, 1]");
        #[cfg(feature = "serde")]
        {
            let json = fs::read_to_string(dir.join(RUN_JSON)).unwrap();
            let back: RunReport = serde_json::from_str(&json).unwrap();
            assert_eq!(back, report);
        }

        let _ = fs::remove_dir_all(&dir);
    }
}
