use anyhow::{Result, bail};
use std::sync::Arc;
use std::time::Instant;

use super::alphabet::Alphabet;
use super::generator::{Generator, space_size};
use super::oracle::Oracle;
use super::report::{LengthReport, SearchReporter, SearchSummary};
use crate::config::{MAX_LENGTH_LIMIT, SearchConfig};
use crate::parallel::ExecutionStrategy;

/// Candidates checked between two progress heartbeats. Power of two so the
/// check compiles to a mask.
pub const PROGRESS_INTERVAL: u64 = 1 << 16;

/// Parallelism only pays off once there are at least this many lengths.
const MIN_LENGTHS_FOR_PARALLEL: usize = 2;

/// Everything one length's worker needs. Shared read-only across workers.
struct SearchPlan {
    alphabet: Alphabet,
    oracle: Oracle,
}

/// Exhaustive search over lengths `1..=max_length`.
pub struct HashSearch {
    plan: Arc<SearchPlan>,
    max_length: usize,
    strategy: ExecutionStrategy,
}

impl HashSearch {
    pub fn new(alphabet: Alphabet, oracle: Oracle, max_length: usize, strategy: ExecutionStrategy) -> Result<Self> {
        if max_length == 0 {
            bail!("max_length must be at least 1");
        }
        if max_length > MAX_LENGTH_LIMIT {
            bail!("max_length must be at most {MAX_LENGTH_LIMIT}, got {max_length}");
        }
        if space_size(alphabet.len(), max_length).is_none() {
            bail!(
                "Search space of {} symbols at length {} exceeds the countable range",
                alphabet.len(),
                max_length
            );
        }

        Ok(Self {
            plan: Arc::new(SearchPlan { alphabet, oracle }),
            max_length,
            strategy,
        })
    }

    /// Build a search from a merged configuration, choosing the strategy from
    /// the `parallel`, `workers` and `thread_percentage` settings.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;

        let alphabet = Alphabet::new(&config.alphabet)?;
        let oracle = Oracle::new(config.prefix.clone(), config.target_hash.value(), config.seed);

        let strategy = if config.parallel {
            let max_workers =
                ExecutionStrategy::calculate_optimal_workers(config.workers, config.thread_percentage);
            // One worker per length at most
            let optimal_workers = std::cmp::min(max_workers, config.max_length);
            ExecutionStrategy::auto(config.max_length, MIN_LENGTHS_FOR_PARALLEL, optimal_workers)
        } else {
            ExecutionStrategy::Sequential
        };

        Self::new(alphabet, oracle, config.max_length, strategy)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.plan.alphabet
    }

    pub fn oracle(&self) -> &Oracle {
        &self.plan.oracle
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn strategy(&self) -> &ExecutionStrategy {
        &self.strategy
    }

    /// `(length, candidate count)` for every length this search covers.
    pub fn plan_sizes(&self) -> Vec<(usize, u64)> {
        (1..=self.max_length)
            .map(|length| {
                // Bounded by the check in `new`
                let size = space_size(self.plan.alphabet.len(), length).unwrap_or(u64::MAX);
                (length, size)
            })
            .collect()
    }

    /// Run every length to exhaustion, streaming events to `reporter`.
    pub fn run(&self, reporter: Arc<dyn SearchReporter>) -> Result<SearchSummary> {
        let start = Instant::now();
        let lengths: Vec<usize> = (1..=self.max_length).collect();

        tracing::info!(
            "Searching lengths 1..={} over {} symbols ({})",
            self.max_length,
            self.plan.alphabet.len(),
            self.strategy
        );

        let plan = self.plan.clone();
        let reports = self.strategy.execute(
            lengths,
            move |&length, worker_id| {
                tracing::debug!("Worker {worker_id} starting length {length}");
                let report = search_length(&plan, length, reporter.as_ref());
                reporter.on_length_complete(&report);
                report
            },
            Some(|current: usize, total: usize, worker_id: usize| {
                tracing::debug!("Completed {current}/{total} lengths [worker-{worker_id}]");
            }),
        )?;

        Ok(SearchSummary::from_reports(
            self.strategy.to_string(),
            reports,
            start.elapsed().as_millis() as u64,
        ))
    }

    /// Search a single length, independent of the configured maximum.
    pub fn run_length(&self, length: usize, reporter: &dyn SearchReporter) -> LengthReport {
        let report = search_length(&self.plan, length, reporter);
        reporter.on_length_complete(&report);
        report
    }
}

fn search_length(plan: &SearchPlan, length: usize, reporter: &dyn SearchReporter) -> LengthReport {
    let start = Instant::now();
    let mut checked: u64 = 0;
    let mut matches = Vec::new();

    Generator::new(&plan.alphabet, length).for_each(|candidate| {
        checked += 1;
        if let Some(found) = plan.oracle.check(candidate) {
            reporter.on_match(&found);
            matches.push(found);
        }
        if checked & (PROGRESS_INTERVAL - 1) == 0 {
            reporter.on_progress(length, checked);
        }
    });

    let elapsed_ms = start.elapsed().as_millis() as u64;
    tracing::debug!(
        "Length {length}: {checked} candidates, {} matches in {elapsed_ms}ms",
        matches.len()
    );

    LengthReport {
        length,
        candidates_checked: checked,
        matches,
        elapsed_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetHash;
    use crate::hash::murmur3_32;
    use crate::search::report::MatchCollector;
    use std::collections::BTreeSet;

    fn search(symbols: &str, prefix: &str, target: u32, max_length: usize, strategy: ExecutionStrategy) -> HashSearch {
        HashSearch::new(
            Alphabet::new(symbols).unwrap(),
            Oracle::new(prefix, target, 0),
            max_length,
            strategy,
        )
        .unwrap()
    }

    /// A digest no candidate over `symbols` up to `max_length` produces.
    fn unreachable_target(symbols: &str, prefix: &str, max_length: usize) -> u32 {
        let alphabet = Alphabet::new(symbols).unwrap();
        let oracle = Oracle::new(prefix, 0, 0);
        let mut seen = BTreeSet::new();
        for length in 1..=max_length {
            Generator::new(&alphabet, length).for_each(|c| {
                seen.insert(oracle.hash(c));
            });
        }
        (0u32..).find(|h| !seen.contains(h)).unwrap()
    }

    #[test]
    fn test_detects_single_length_one_match() {
        let target = murmur3_32(b"OBJLIST_CRAFT_A", 0);
        let engine = search("ABC", "OBJLIST_CRAFT_", target, 1, ExecutionStrategy::Sequential);
        let collector = Arc::new(MatchCollector::new());

        let summary = engine.run(collector.clone()).unwrap();

        let prefixed: Vec<String> = collector.matches().into_iter().map(|m| m.prefixed).collect();
        assert_eq!(prefixed, vec!["OBJLIST_CRAFT_A".to_string()]);
        assert_eq!(summary.matches.len(), 1);
        assert_eq!(summary.total_candidates, 3);
    }

    #[test]
    fn test_no_false_positives() {
        let target = unreachable_target("AB", "OBJLIST_CRAFT_", 3);
        let engine = search("AB", "OBJLIST_CRAFT_", target, 3, ExecutionStrategy::Sequential);
        let collector = Arc::new(MatchCollector::new());

        let summary = engine.run(collector.clone()).unwrap();

        assert!(collector.matches().is_empty());
        assert!(summary.matches.is_empty());
        assert_eq!(summary.total_candidates, 2 + 4 + 8);
    }

    #[test]
    fn test_lengths_complete_in_increasing_order() {
        let engine = search("AB", "P_", 0, 4, ExecutionStrategy::Sequential);
        let collector = Arc::new(MatchCollector::new());

        let summary = engine.run(collector.clone()).unwrap();

        assert_eq!(collector.completed_lengths(), vec![1, 2, 3, 4]);
        let counts: Vec<u64> = summary.lengths.iter().map(|r| r.candidates_checked).collect();
        assert_eq!(counts, vec![2, 4, 8, 16]);
    }

    #[test]
    fn test_match_at_longer_length() {
        let target = murmur3_32(b"OBJLIST_CRAFT_BAC", 0);
        let engine = search("ABC", "OBJLIST_CRAFT_", target, 3, ExecutionStrategy::Sequential);
        let summary = engine.run(Arc::new(MatchCollector::new())).unwrap();

        assert!(summary.matches.iter().any(|m| m.prefixed == "OBJLIST_CRAFT_BAC" && m.length == 3));
        assert!(summary.lengths[2].matches.iter().any(|m| m.candidate == "BAC"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let target = murmur3_32(b"X_CAB", 0);
        let sequential = search("ABC", "X_", target, 4, ExecutionStrategy::Sequential)
            .run(Arc::new(MatchCollector::new()))
            .unwrap();
        let parallel = search("ABC", "X_", target, 4, ExecutionStrategy::Parallel { workers: 4 })
            .run(Arc::new(MatchCollector::new()))
            .unwrap();

        assert_eq!(sequential.matches, parallel.matches);
        assert_eq!(sequential.total_candidates, parallel.total_candidates);
        let seq_lengths: Vec<usize> = sequential.lengths.iter().map(|r| r.length).collect();
        let par_lengths: Vec<usize> = parallel.lengths.iter().map(|r| r.length).collect();
        assert_eq!(seq_lengths, par_lengths);
        assert_eq!(parallel.strategy, "parallel (4 workers)");
    }

    #[test]
    fn test_parallel_reports_every_length() {
        let engine = search("AB", "P_", 0, 5, ExecutionStrategy::Parallel { workers: 3 });
        let collector = Arc::new(MatchCollector::new());
        engine.run(collector.clone()).unwrap();

        let mut completed = collector.completed_lengths();
        completed.sort();
        assert_eq!(completed, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_idempotent() {
        let target = murmur3_32(b"P_BA", 0);
        for strategy in [ExecutionStrategy::Sequential, ExecutionStrategy::Parallel { workers: 3 }] {
            let engine = search("AB", "P_", target, 3, strategy.clone());
            let first = engine.run(Arc::new(MatchCollector::new())).unwrap();
            let second = engine.run(Arc::new(MatchCollector::new())).unwrap();
            assert_eq!(first.matches, second.matches, "{strategy}");
            assert_eq!(first.total_candidates, second.total_candidates, "{strategy}");
            assert_eq!(first.matches.len(), 1, "{strategy}");
        }
    }

    #[test]
    fn test_match_does_not_stop_search() {
        let target = murmur3_32(b"Q", 0);
        let engine = search("Q", "", target, 3, ExecutionStrategy::Sequential);
        let collector = Arc::new(MatchCollector::new());

        let summary = engine.run(collector.clone()).unwrap();

        assert_eq!(summary.matches.len(), 1);
        assert_eq!(summary.total_candidates, 3);
        assert_eq!(collector.completed_lengths(), vec![1, 2, 3]);
    }

    #[test]
    fn test_run_length_ignores_max_length() {
        let engine = search("AB", "P_", 0, 1, ExecutionStrategy::Sequential);
        let collector = MatchCollector::new();
        let report = engine.run_length(3, &collector);
        assert_eq!(report.candidates_checked, 8);
        assert_eq!(collector.completed_lengths(), vec![3]);
    }

    #[test]
    fn test_from_config() {
        let config = SearchConfig {
            alphabet: "AB".to_string(),
            max_length: 2,
            prefix: "P_".to_string(),
            target_hash: TargetHash(murmur3_32(b"P_AB", 0)),
            ..SearchConfig::default()
        };
        let engine = HashSearch::from_config(&config).unwrap();
        assert_eq!(engine.strategy(), &ExecutionStrategy::Sequential);
        assert_eq!(engine.plan_sizes(), vec![(1, 2), (2, 4)]);

        let summary = engine.run(Arc::new(MatchCollector::new())).unwrap();
        assert_eq!(summary.matches.len(), 1);
        assert_eq!(summary.matches[0].candidate, "AB");
    }

    #[test]
    fn test_from_config_parallel_is_capped_by_lengths() {
        let config = SearchConfig {
            alphabet: "AB".to_string(),
            max_length: 2,
            parallel: true,
            workers: 64,
            thread_percentage: 100,
            ..SearchConfig::default()
        };
        let engine = HashSearch::from_config(&config).unwrap();
        match engine.strategy() {
            ExecutionStrategy::Parallel { workers } => assert!(*workers <= 2),
            ExecutionStrategy::Sequential => {} // single-core machine
        }

        let single = SearchConfig {
            max_length: 1,
            parallel: true,
            ..config
        };
        let engine = HashSearch::from_config(&single).unwrap();
        assert_eq!(engine.strategy(), &ExecutionStrategy::Sequential);
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = SearchConfig {
            alphabet: "AA".to_string(),
            ..SearchConfig::default()
        };
        assert!(HashSearch::from_config(&config).is_err());

        let config = SearchConfig {
            max_length: 20,
            ..SearchConfig::default()
        };
        assert!(HashSearch::from_config(&config).is_err());
    }

    #[test]
    fn test_single_symbol_length_is_capped() {
        let config = SearchConfig {
            alphabet: "A".to_string(),
            max_length: 2_000_000,
            ..SearchConfig::default()
        };
        assert!(HashSearch::from_config(&config).is_err());

        let alphabet = Alphabet::new("A").unwrap();
        let oracle = Oracle::new("", 0, 0);
        assert!(HashSearch::new(alphabet, oracle, 65, ExecutionStrategy::Sequential).is_err());

        let engine = search("A", "", murmur3_32(&[b'A'; 64], 0), 64, ExecutionStrategy::Sequential);
        let summary = engine.run(Arc::new(MatchCollector::new())).unwrap();
        assert_eq!(summary.total_candidates, 64);
        assert_eq!(summary.matches.last().map(|m| m.length), Some(64));
    }

    #[test]
    fn test_shipped_space_sizes() {
        let engine = HashSearch::from_config(&SearchConfig::default()).unwrap();
        let sizes = engine.plan_sizes();
        assert_eq!(sizes.len(), 7);
        assert_eq!(sizes[0], (1, 27));
        assert_eq!(sizes[6], (7, 10_460_353_203));
        assert_eq!(engine.oracle().prefix(), "OBJLIST_CRAFT_");
        assert_eq!(engine.oracle().target(), 0x5217_EA61);
    }
}
