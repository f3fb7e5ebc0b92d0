//! Search results and the sink that receives them while the search runs.

use serde::Serialize;
use std::sync::Mutex;

use super::oracle::Match;

/// Outcome of enumerating every candidate of one length.
#[derive(Debug, Clone, Serialize)]
pub struct LengthReport {
    pub length: usize,
    pub candidates_checked: u64,
    pub matches: Vec<Match>,
    pub elapsed_ms: u64,
}

/// Outcome of a whole search, lengths in increasing order.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSummary {
    pub strategy: String,
    pub lengths: Vec<LengthReport>,
    pub total_candidates: u64,
    pub matches: Vec<Match>,
    pub elapsed_ms: u64,
}

impl SearchSummary {
    pub fn from_reports(strategy: String, mut lengths: Vec<LengthReport>, elapsed_ms: u64) -> Self {
        lengths.sort_by_key(|report| report.length);
        let total_candidates = lengths.iter().map(|r| r.candidates_checked).sum();
        let matches = lengths.iter().flat_map(|r| r.matches.iter().cloned()).collect();
        Self {
            strategy,
            lengths,
            total_candidates,
            matches,
            elapsed_ms,
        }
    }

    /// Candidates per second, 0 when the run was too short to measure.
    pub fn throughput(&self) -> f64 {
        if self.elapsed_ms == 0 {
            return 0.0;
        }
        self.total_candidates as f64 / (self.elapsed_ms as f64 / 1000.0)
    }
}

/// Receives events as the search produces them.
///
/// With the parallel strategy, several lengths report concurrently, so
/// implementations must be safe to share across worker threads.
pub trait SearchReporter: Send + Sync {
    /// A candidate hit the target. Called immediately, before the length finishes.
    fn on_match(&self, found: &Match);

    /// Periodic heartbeat with the number of candidates checked so far for `length`.
    fn on_progress(&self, _length: usize, _checked: u64) {}

    /// Every candidate of `report.length` has been checked.
    fn on_length_complete(&self, report: &LengthReport);
}

/// Reporter that records everything it is told. Used for library callers
/// that only want the final result, and in tests.
#[derive(Debug, Default)]
pub struct MatchCollector {
    matches: Mutex<Vec<Match>>,
    completed: Mutex<Vec<usize>>,
}

impl MatchCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self) -> Vec<Match> {
        self.matches.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Lengths in the order they completed.
    pub fn completed_lengths(&self) -> Vec<usize> {
        self.completed.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl SearchReporter for MatchCollector {
    fn on_match(&self, found: &Match) {
        if let Ok(mut matches) = self.matches.lock() {
            matches.push(found.clone());
        }
    }

    fn on_length_complete(&self, report: &LengthReport) {
        if let Ok(mut completed) = self.completed.lock() {
            completed.push(report.length);
        }
    }
}
