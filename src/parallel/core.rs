use anyhow::{Result, anyhow};
use crossbeam::channel::unbounded;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scoped worker pool over a work list known up front.
///
/// Workers claim the next unclaimed index, so a slow item never holds back
/// the others. Results come back in work-list order.
pub struct ParallelExecutor {
    workers: usize,
}

impl ParallelExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn execute<T, R, F, P>(
        &self,
        work_items: &[T],
        processor: F,
        progress_reporter: Option<P>,
    ) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T, usize) -> R + Sync, // (item, worker_id)
        P: Fn(usize, usize, usize) + Sync, // (completed, total, worker_id)
    {
        let total = work_items.len();
        let next = AtomicUsize::new(0);
        let completed = AtomicUsize::new(0);
        let (result_tx, result_rx) = unbounded::<(usize, R)>();

        crossbeam::thread::scope(|s| {
            for worker_id in 0..self.workers.min(total) {
                let result_tx = result_tx.clone();
                let (next, completed) = (&next, &completed);
                let (processor, progress_reporter) = (&processor, &progress_reporter);

                s.spawn(move |_| {
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(item) = work_items.get(index) else {
                            break;
                        };
                        // Receiver outlives the scope
                        let _ = result_tx.send((index, processor(item, worker_id)));

                        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        if let Some(reporter) = progress_reporter {
                            reporter(done, total, worker_id);
                        }
                    }
                });
            }
        })
        .map_err(|_| anyhow!("Worker thread panicked during parallel execution"))?;

        drop(result_tx);
        let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(total).collect();
        for (index, result) in result_rx {
            slots[index] = Some(result);
        }
        slots
            .into_iter()
            .collect::<Option<Vec<R>>>()
            .ok_or_else(|| anyhow!("Parallel execution finished with missing results"))
    }
}

/// Execution strategy enum for choosing between parallel and sequential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
}

impl ExecutionStrategy {
    /// Run `processor` over every item, returning results in item order.
    pub fn execute<T, R, F, P>(
        &self,
        work_items: Vec<T>,
        processor: F,
        progress_reporter: Option<P>,
    ) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T, usize) -> R + Sync,
        P: Fn(usize, usize, usize) + Sync,
    {
        match self {
            ExecutionStrategy::Sequential => {
                let total = work_items.len();
                let results = work_items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let result = processor(item, 0);
                        if let Some(reporter) = &progress_reporter {
                            reporter(index + 1, total, 0);
                        }
                        result
                    })
                    .collect();
                Ok(results)
            }
            ExecutionStrategy::Parallel { workers } => {
                ParallelExecutor::new(*workers).execute(&work_items, processor, progress_reporter)
            }
        }
    }

    /// Threshold decision between sequential and parallel execution.
    ///
    /// The caller supplies the worker count it already adapted to its workload;
    /// this only compares the item count against the threshold.
    ///
    /// ```rust
    /// use hashcrack::parallel::ExecutionStrategy;
    ///
    /// let strategy = ExecutionStrategy::auto(1, 2, 4);
    /// assert!(matches!(strategy, ExecutionStrategy::Sequential));
    ///
    /// let strategy = ExecutionStrategy::auto(7, 2, 4);
    /// assert_eq!(strategy, ExecutionStrategy::Parallel { workers: 4 });
    /// ```
    pub fn auto(
        work_items_count: usize,
        min_items_for_parallel: usize,
        optimal_workers: usize,
    ) -> Self {
        if work_items_count >= min_items_for_parallel && optimal_workers > 1 {
            ExecutionStrategy::Parallel {
                workers: optimal_workers,
            }
        } else {
            ExecutionStrategy::Sequential
        }
    }

    /// Worker ceiling from available cores and user limits.
    ///
    /// ```text
    /// 1. Detect available CPU cores: num_cpus::get()
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    ///
    /// ```rust
    /// use hashcrack::parallel::ExecutionStrategy;
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(0, 75);
    /// assert!(workers >= 1);
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(8, 75);
    /// assert!(workers <= 8);
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        // 0 means use percentage calculation only
        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStrategy::Sequential => write!(f, "sequential"),
            ExecutionStrategy::Parallel { workers } => write!(f, "parallel ({workers} workers)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_sequential_reports_every_item() {
        let seen = Mutex::new(Vec::new());
        let results = ExecutionStrategy::Sequential
            .execute(
                vec!['a', 'b', 'c'],
                |c, _| c.to_ascii_uppercase(),
                Some(|current: usize, total: usize, worker: usize| {
                    seen.lock().unwrap().push((current, total, worker))
                }),
            )
            .unwrap();
        assert_eq!(results, vec!['A', 'B', 'C']);
        assert_eq!(seen.into_inner().unwrap(), vec![(1, 3, 0), (2, 3, 0), (3, 3, 0)]);
    }

    #[test]
    fn test_parallel_executor_keeps_item_order() {
        let executor = ParallelExecutor::new(3);
        let items: Vec<u64> = (1..=20).collect();
        let results = executor
            .execute(&items, |x, _worker_id| x * x, None::<fn(usize, usize, usize)>)
            .unwrap();
        let expected: Vec<u64> = items.iter().map(|x| x * x).collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_parallel_executor_reports_each_completion() {
        let executor = ParallelExecutor::new(2);
        let seen = Mutex::new(Vec::new());
        executor
            .execute(
                &[1, 2, 3, 4],
                |x, _| *x,
                Some(|current: usize, total: usize, _worker: usize| {
                    seen.lock().unwrap().push((current, total))
                }),
            )
            .unwrap();
        let mut seen = seen.into_inner().unwrap();
        seen.sort();
        assert_eq!(seen, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[test]
    fn test_parallel_executor_empty() {
        let executor = ParallelExecutor::new(4);
        let results: Vec<u8> = executor
            .execute(&[] as &[u8], |x, _| *x, None::<fn(usize, usize, usize)>)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_parallel_executor_clamps_workers() {
        assert_eq!(ParallelExecutor::new(0).workers(), 1);
        assert_eq!(ParallelExecutor::new(6).workers(), 6);
    }

    #[test]
    fn test_parallel_executor_surfaces_panics() {
        let executor = ParallelExecutor::new(2);
        let result = executor.execute(
            &[1, 2, 3],
            |x: &i32, _| {
                if *x == 2 {
                    panic!("worker failure");
                }
                *x
            },
            None::<fn(usize, usize, usize)>,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_execution_strategy() {
        let work_items = vec![1, 2, 3];

        let sequential = ExecutionStrategy::Sequential;
        let seq_results = sequential
            .execute(
                work_items.clone(),
                |x, _worker_id| x * 3,
                None::<fn(usize, usize, usize)>,
            )
            .unwrap();
        assert_eq!(seq_results, vec![3, 6, 9]);

        let parallel = ExecutionStrategy::Parallel { workers: 2 };
        let par_results = parallel
            .execute(
                work_items,
                |x, _worker_id| x * 3,
                None::<fn(usize, usize, usize)>,
            )
            .unwrap();
        let mut sorted_par_results = par_results;
        sorted_par_results.sort();
        assert_eq!(sorted_par_results, vec![3, 6, 9]);
    }

    #[test]
    fn test_auto_strategy() {
        // Too few items
        let strategy = ExecutionStrategy::auto(1, 2, 8);
        assert!(matches!(strategy, ExecutionStrategy::Sequential));

        // A single worker gains nothing over sequential
        let strategy = ExecutionStrategy::auto(7, 2, 1);
        assert!(matches!(strategy, ExecutionStrategy::Sequential));

        let strategy = ExecutionStrategy::auto(7, 2, 8);
        assert!(matches!(strategy, ExecutionStrategy::Parallel { workers: 8 }));
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(ExecutionStrategy::Sequential.to_string(), "sequential");
        assert_eq!(
            ExecutionStrategy::Parallel { workers: 3 }.to_string(),
            "parallel (3 workers)"
        );
    }
}
