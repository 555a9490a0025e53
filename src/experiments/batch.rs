//! Runs many experiments, each with its own world and navigator.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::ExperimentConfig;
use crate::driver::NavigationRun;
use crate::error::Result;
use crate::observer::NoopObserver;

#[derive(Debug)]
pub struct BatchEntry {
    pub name: String,
    pub result: Result<NavigationRun>,
}

fn run_one(cfg: &ExperimentConfig) -> BatchEntry {
    BatchEntry {
        name: cfg.name.clone(),
        result: cfg.run(&mut NoopObserver),
    }
}

/// Results come back in input order. With the `parallel` feature runs are
/// spread over the rayon pool; runs share nothing, so the outcome is the same.
pub fn run_batch(configs: &[ExperimentConfig]) -> Vec<BatchEntry> {
    #[cfg(feature = "parallel")]
    let entries = configs.par_iter().map(run_one).collect();
    #[cfg(not(feature = "parallel"))]
    let entries = configs.iter().map(run_one).collect();
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;

    #[test]
    fn batch_preserves_order_and_isolates_failures() {
        let mut configs = ExperimentConfig::presets();
        let mut broken = ExperimentConfig::preset(1).unwrap();
        broken.name = "broken".to_string();
        broken.obstacles.push(99);
        configs.insert(1, broken);

        let entries = run_batch(&configs);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "robotDemo",
                "broken",
                "test4x4simple",
                "test6x6simple",
                "test6x6complex"
            ]
        );
        assert!(matches!(
            entries[1].result,
            Err(NavError::Configuration(_))
        ));

        let solo = ExperimentConfig::preset(2)
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        match &entries[3].result {
            Ok(run) => assert_eq!(run, &solo),
            Err(e) => panic!("preset 2 failed in batch: {e}"),
        }
    }
}
