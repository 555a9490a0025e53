use gridnav::driver::NavigationRun;
use gridnav::experiments::batch::run_batch;
use gridnav::experiments::ExperimentConfig;
use gridnav::observer::SpikeSchedule;
use gridnav::report::MapReport;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        print_help();
        return;
    }
    if args.len() >= 2 && args[1] == "all" {
        run_all();
        return;
    }
    if args.len() >= 2 && args[1] == "experiment" {
        let id = match args.get(2).map(|s| s.parse::<u32>()) {
            Some(Ok(id)) => id,
            _ => {
                eprintln!(
                    "experiment needs a numeric id (0-{})",
                    ExperimentConfig::PRESET_COUNT - 1
                );
                std::process::exit(2);
            }
        };
        run_experiment(id);
        return;
    }

    if args.len() >= 2 {
        eprintln!("Unknown command: {}", args[1]);
        print_help();
        std::process::exit(2);
    }

    // Default: the 4x4 map with a single obstacle on the direct route.
    run_experiment(1);
}

fn run_experiment(id: u32) {
    let Some(cfg) = ExperimentConfig::preset(id) else {
        eprintln!("No preset experiment with id {id}");
        std::process::exit(2);
    };

    let mut spikes = SpikeSchedule::new();
    match cfg.run(&mut spikes) {
        Ok(run) => {
            print_run(&cfg.name, &run);
            println!(
                "spikes: {} search, simulated {:.1} ms",
                spikes.search_times().len(),
                spikes.elapsed_ms()
            );
        }
        Err(e) => {
            eprintln!("{}: {e}", cfg.name);
            std::process::exit(1);
        }
    }
}

fn run_all() {
    let configs = ExperimentConfig::presets();
    let mut failed = false;
    for entry in run_batch(&configs) {
        match entry.result {
            Ok(run) => print_run(&entry.name, &run),
            Err(e) => {
                eprintln!("{}: {e}", entry.name);
                failed = true;
            }
        }
        println!();
    }
    if failed {
        std::process::exit(1);
    }
}

fn print_run(name: &str, run: &NavigationRun) {
    println!(
        "{name}: {} after {} steps ({} dead ends)",
        run.status.as_str(),
        run.steps,
        run.dead_ends
    );
    println!("commands: {:?}", run.command_codes());
    println!("{}", MapReport::from_grid(&run.final_map).formatted());
}

fn print_help() {
    println!(
        "gridnav - greedy grid navigator\n\n\
         USAGE:\n  \
           gridnav                  run preset 1 (4x4, one obstacle)\n  \
           gridnav experiment <id>  run a preset (0-{})\n  \
           gridnav all              run every preset\n  \
           gridnav help             show this message\n\n\
         Set RUST_LOG=debug to trace every step.",
        ExperimentConfig::PRESET_COUNT - 1
    );
}
