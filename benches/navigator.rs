//! Criterion benchmarks for the navigator.
//!
//! Run with:
//!   cargo bench
//!   cargo bench --features parallel
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use gridnav::experiments::batch::run_batch;
use gridnav::experiments::ExperimentConfig;
use gridnav::grid::{Cell, GridWorld};
use gridnav::navigator::{Navigator, NavigatorConfig};
use gridnav::observer::NoopObserver;

/// Full runs of each preset, including map annotation.
fn bench_presets(c: &mut Criterion) {
    let mut group = c.benchmark_group("preset_run");

    for cfg in ExperimentConfig::presets() {
        group.bench_with_input(BenchmarkId::from_parameter(&cfg.name), &cfg, |b, cfg| {
            b.iter(|| {
                let run = cfg.run(&mut NoopObserver).unwrap();
                black_box(run.steps)
            });
        });
    }

    group.finish();
}

/// Raw step() cost on open grids where the run walks a long diagonal.
fn bench_open_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_grid");

    for size in [8u32, 16, 32, 64].iter() {
        group.throughput(Throughput::Elements((2 * (*size - 1)) as u64));
        group.bench_with_input(BenchmarkId::new("steps", size), size, |b, &size| {
            let world = GridWorld::new(size, size, &[]).unwrap();
            let cfg = NavigatorConfig::default().with_safety_cap(10_000);
            b.iter(|| {
                let mut nav = Navigator::new(
                    world.clone(),
                    Cell::new(0, 0),
                    Cell::new(size - 1, size - 1),
                    cfg,
                )
                .unwrap();
                while !nav.status().is_terminal() {
                    black_box(nav.step().unwrap());
                }
                black_box(nav.state().steps())
            });
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let configs: Vec<ExperimentConfig> = (0..64)
        .filter_map(|i| ExperimentConfig::preset(i % ExperimentConfig::PRESET_COUNT))
        .collect();

    c.bench_function("batch_64_presets", |b| {
        b.iter(|| black_box(run_batch(&configs).len()));
    });
}

criterion_group!(benches, bench_presets, bench_open_grid, bench_batch);
criterion_main!(benches);
