//! # hashcrack - brute-force MurmurHash3 preimage search
//!
//! hashcrack recovers the original name behind a 32-bit MurmurHash3 digest
//! when the name is short and built from a known alphabet. It enumerates
//! every string up to a maximum length, hashes `prefix ++ candidate`, and
//! reports each candidate whose digest equals the target.
//!
//! ## Quick Start
//!
//! ```bash
//! # Search the built-in space: A-Z and _, lengths 1..=7,
//! # prefix OBJLIST_CRAFT_, target 0x5217EA61
//! hashcrack
//!
//! # Smaller search with overrides, one worker per length
//! hashcrack search --max-length 4 --target 0xDEADBEEF --parallel --progress
//!
//! # List digests of known names
//! hashcrack hash OBJLIST_CRAFT_SWORD OBJLIST_CRAFT_SHIELD
//! ```
//!
//! ## Configuration
//!
//! Defaults can be overridden from `hashcrack.toml` (or `.json`/`.yaml`),
//! `HASHCRACK_*` environment variables, and CLI flags:
//!
//! ```toml
//! alphabet = "ABCDEFGHIJKLMNOPQRSTUVWXYZ_0123456789"
//! max_length = 5
//! prefix = "PC_"
//! target_hash = "0x5217EA61"
//! parallel = true
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hashcrack::config::SearchConfig;
//! use hashcrack::search::{HashSearch, MatchCollector};
//!
//! let config = SearchConfig::load(None, None)?;
//! let search = HashSearch::from_config(&config)?;
//! let summary = search.run(Arc::new(MatchCollector::new()))?;
//!
//! for found in summary.matches {
//!     println!("{}", found.prefixed);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod hash;
pub mod parallel;
pub mod search;

pub use cli::{Cli, Output};
pub use config::SearchConfig;

/// Result type alias for hashcrack operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
