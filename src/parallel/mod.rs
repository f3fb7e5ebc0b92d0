//! Generic execution framework
//!
//! This module only manages system resources and execution strategy:
//! - **Resource Discovery**: detects available CPU cores using `num_cpus::get()`
//! - **Resource Calculation**: applies user limits (thread percentage, max threads)
//! - **Execution Strategy**: sequential or a crossbeam worker pool
//! - **Progress Display**: stacked `indicatif` bars, one per work item
//!
//! It knows nothing about candidates or hashes. The search engine decides
//! what a work item is (one candidate length) and how many workers make sense.
//!
//! ```rust
//! use hashcrack::parallel::ExecutionStrategy;
//!
//! let max_workers = ExecutionStrategy::calculate_optimal_workers(0, 75);
//! let strategy = ExecutionStrategy::auto(7, 2, max_workers.min(7));
//! let results = strategy
//!     .execute(vec![1usize, 2, 3], |x, _worker| x * 2, None::<fn(usize, usize, usize)>)
//!     .unwrap();
//! assert_eq!(results.len(), 3);
//! ```

pub mod core;
pub mod progress;

pub use self::core::ExecutionStrategy;
pub use progress::LengthProgress;
