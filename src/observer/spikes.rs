use crate::direction::Direction;
use crate::navigator::StepOutcome;

use super::{NavigatorSnapshot, StepObserver};

/// Spike times that encode the emitted command stream for a timing network.
///
/// Each command produces one spike on the search trigger and one on the
/// match neuron for that command, then simulated time advances by one chunk.
/// Times are in milliseconds and always strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeSchedule {
    chunk_ms: f64,
    search_delay_ms: f64,
    match_delay_ms: f64,
    now_ms: f64,
    search: Vec<f64>,
    matches: [Vec<f64>; 4],
}

impl SpikeSchedule {
    pub fn new() -> Self {
        Self {
            chunk_ms: 50.0,
            search_delay_ms: 1.0,
            match_delay_ms: 10.0,
            // A spike at t=0 is rejected by most simulators.
            now_ms: 1.0,
            search: Vec::new(),
            matches: Default::default(),
        }
    }

    pub fn with_chunk_ms(mut self, chunk_ms: f64) -> Self {
        self.chunk_ms = chunk_ms.max(0.0);
        self
    }

    pub fn push(&mut self, command: Direction) {
        self.search.push(self.now_ms + self.search_delay_ms);
        self.matches[command.code() as usize].push(self.now_ms + self.match_delay_ms);
        self.now_ms += self.chunk_ms;
    }

    pub fn search_times(&self) -> &[f64] {
        &self.search
    }

    pub fn match_times(&self, command: Direction) -> &[f64] {
        &self.matches[command.code() as usize]
    }

    /// Simulated time covered so far.
    pub fn elapsed_ms(&self) -> f64 {
        self.now_ms
    }
}

impl Default for SpikeSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl StepObserver for SpikeSchedule {
    fn on_step(&mut self, outcome: &StepOutcome, _snapshot: &NavigatorSnapshot) {
        if let Some(command) = outcome.command {
            self.push(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_command_lands_on_its_match_neuron() {
        let mut s = SpikeSchedule::new();
        s.push(Direction::Down);
        s.push(Direction::Left);
        s.push(Direction::Down);

        assert_eq!(s.search_times(), &[2.0, 52.0, 102.0]);
        assert_eq!(s.match_times(Direction::Down), &[11.0, 111.0]);
        assert_eq!(s.match_times(Direction::Left), &[61.0]);
        assert!(s.match_times(Direction::Up).is_empty());
        assert_eq!(s.elapsed_ms(), 151.0);
    }

    #[test]
    fn all_times_are_positive() {
        let mut s = SpikeSchedule::new().with_chunk_ms(0.0);
        s.push(Direction::Up);
        s.push(Direction::Up);
        assert!(s.search_times().iter().all(|&t| t > 0.0));
        assert!(s.match_times(Direction::Up).iter().all(|&t| t > 0.0));
    }
}
