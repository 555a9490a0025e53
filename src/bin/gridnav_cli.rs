//! Command-line runner for gridnav experiments.
//!
//! Examples:
//!   gridnav-cli preset 1
//!   gridnav-cli preset 3 --out results/test6x6complex
//!   gridnav-cli run my_map.json --out results
//!   gridnav-cli batch maps.json more_maps.json --out results
//!
//! Result files land in `<out>/<experiment name>/` when `--out` is given, so
//! names must be distinct plain directory names. Otherwise the run summary is
//! printed as JSON.

use gridnav::experiments::batch::run_batch;
use gridnav::experiments::ExperimentConfig;
use gridnav::report::{write_run, RunReport};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn usage() -> ! {
    eprintln!(
        "usage: gridnav-cli [--out DIR] <command>\n\n\
         commands:\n  \
           preset <id>           run a built-in experiment (0-{})\n  \
           run <config.json>     run one experiment (or an array of them)\n  \
           batch <file.json>...  run every experiment in the given files",
        ExperimentConfig::PRESET_COUNT - 1
    );
    process::exit(2);
}

fn fail(msg: &str) -> ! {
    eprintln!("{msg}");
    process::exit(1);
}

/// Splits `--out DIR` from the positional arguments.
fn parse_args() -> (Option<PathBuf>, Vec<String>) {
    let mut out = None;
    let mut rest = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--out" {
            match args.next() {
                Some(dir) => out = Some(PathBuf::from(dir)),
                None => usage(),
            }
        } else {
            rest.push(arg);
        }
    }
    if rest.is_empty() {
        usage();
    }
    (out, rest)
}

fn load_configs(paths: &[String]) -> Vec<ExperimentConfig> {
    let mut configs = Vec::new();
    for p in paths {
        match ExperimentConfig::load_many(Path::new(p)) {
            Ok(mut cfgs) => configs.append(&mut cfgs),
            Err(e) => fail(&format!("{p}: {e}")),
        }
    }
    configs
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let (out, args) = parse_args();
    let configs = match args[0].as_str() {
        "preset" => {
            if args.len() < 2 {
                usage();
            }
            let id: u32 = args[1]
                .parse()
                .unwrap_or_else(|_| fail("preset id must be a number"));
            match ExperimentConfig::preset(id) {
                Some(cfg) => vec![cfg],
                None => fail(&format!("no preset with id {id}")),
            }
        }
        "run" => {
            if args.len() != 2 {
                usage();
            }
            load_configs(&args[1..])
        }
        "batch" => {
            if args.len() < 2 {
                usage();
            }
            load_configs(&args[1..])
        }
        other => {
            eprintln!("Unknown command: {other}");
            usage();
        }
    };

    if out.is_some() {
        if let Err(e) = ExperimentConfig::check_names(&configs) {
            fail(&e.to_string());
        }
    }

    let mut failures = 0usize;
    for entry in run_batch(&configs) {
        let run = match entry.result {
            Ok(run) => run,
            Err(e) => {
                error!(experiment = %entry.name, "{e}");
                failures += 1;
                continue;
            }
        };

        let report = RunReport::new(entry.name.clone(), &run);
        match &out {
            Some(dir) => {
                let dir = dir.join(&entry.name);
                if let Err(e) = write_run(&dir, &report) {
                    error!(experiment = %entry.name, "writing results: {e}");
                    failures += 1;
                    continue;
                }
                info!(
                    experiment = %entry.name,
                    status = report.status.as_str(),
                    dir = %dir.display(),
                    "results written"
                );
            }
            None => match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    error!(experiment = %entry.name, "serialize: {e}");
                    failures += 1;
                }
            },
        }
    }

    if failures > 0 {
        process::exit(1);
    }
}
