//! Statistics for a live run
//!
//! Tracks how many runs were attempted, how they ended and how long the
//! simulation has been going.

use std::collections::HashMap;

use super::train::Failure;

/// Counters kept by [`super::SimWorld`]
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Runs begun on a fresh route
    pub runs_started: usize,

    /// Runs that left the route within the end limit
    pub runs_completed: usize,

    /// Runs that ended in a rule violation, by kind
    pub failures: HashMap<Failure, usize>,

    /// Searches that hit their ceiling
    pub searches_exhausted: usize,

    /// Searches that could not run with the configured generator or time step
    pub search_errors: usize,

    /// Simulated time in seconds
    pub time: f64,

    /// Simulated time since the current run started
    pub current_run_time: f64,

    /// Fastest completed run in seconds
    pub best_completion_time: Option<f64>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_run(&mut self) {
        self.runs_started += 1;
        self.current_run_time = 0.0;
    }

    pub fn advance(&mut self, delta_secs: f64) {
        self.time += delta_secs;
        self.current_run_time += delta_secs;
    }

    pub fn complete_run(&mut self) {
        self.runs_completed += 1;
        let run_time = self.current_run_time;
        self.best_completion_time = Some(match self.best_completion_time {
            Some(best) => best.min(run_time),
            None => run_time,
        });
    }

    pub fn record_failure(&mut self, failure: Failure) {
        *self.failures.entry(failure).or_insert(0) += 1;
    }

    pub fn failure_count(&self, failure: Failure) -> usize {
        self.failures.get(&failure).copied().unwrap_or(0)
    }

    pub fn total_failures(&self) -> usize {
        self.failures.values().sum()
    }

    /// Share of finished runs that completed, as a percentage
    pub fn success_rate(&self) -> f64 {
        let finished = self.runs_completed + self.total_failures();
        if finished == 0 {
            0.0
        } else {
            self.runs_completed as f64 / finished as f64 * 100.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Runs: {} | Completed: {} | Failed: {} | Time: {:.1}s",
            self.runs_started,
            self.runs_completed,
            self.total_failures(),
            self.time
        )
    }
}
