//! Brute-force preimage search
//!
//! - [`Generator`] enumerates every string of one length in odometer order
//! - [`Oracle`] hashes `prefix ++ candidate` and compares against the target
//! - [`HashSearch`] drives lengths `1..=max_length` through an
//!   [`ExecutionStrategy`](crate::parallel::ExecutionStrategy)
//! - [`SearchReporter`] receives matches and per-length completion as they happen
//!
//! ```rust
//! use std::sync::Arc;
//! use hashcrack::hash::murmur3_32;
//! use hashcrack::parallel::ExecutionStrategy;
//! use hashcrack::search::{Alphabet, HashSearch, MatchCollector, Oracle};
//!
//! let target = murmur3_32(b"PC_AB", 0);
//! let search = HashSearch::new(
//!     Alphabet::new("AB").unwrap(),
//!     Oracle::new("PC_", target, 0),
//!     2,
//!     ExecutionStrategy::Sequential,
//! ).unwrap();
//!
//! let summary = search.run(Arc::new(MatchCollector::new())).unwrap();
//! assert_eq!(summary.matches[0].prefixed, "PC_AB");
//! ```

pub mod alphabet;
pub mod engine;
pub mod generator;
pub mod oracle;
pub mod report;

pub use alphabet::Alphabet;
pub use engine::HashSearch;
pub use generator::Generator;
pub use oracle::{Match, Oracle};
pub use report::{LengthReport, MatchCollector, SearchReporter, SearchSummary};
