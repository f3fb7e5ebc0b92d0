//! Configuration management for hashcrack
//!
//! Every search parameter has a built-in default (see `default-config.toml`),
//! so running without any configuration searches the shipped space. Values
//! can be layered from a config file, `HASHCRACK_*` environment variables
//! and CLI flags; see [`SearchConfig::load`].

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

mod core;

pub use self::core::ENV_PREFIX;

/// Longest candidate length accepted. Any two-symbol space past this
/// overflows `u64`, and the generator recurses once per position.
pub const MAX_LENGTH_LIMIT: usize = 64;

/// Complete search configuration after all layers are merged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Symbols candidates are built from, in enumeration order
    pub alphabet: String,

    /// Longest candidate length searched; lengths 1..=max_length are covered
    pub max_length: usize,

    /// Literal prepended to each candidate before hashing
    pub prefix: String,

    /// Digest a candidate must produce to be reported
    pub target_hash: TargetHash,

    /// MurmurHash3 seed
    pub seed: u32,

    /// Search lengths concurrently, one worker per length
    pub parallel: bool,

    /// Worker limit for the parallel strategy (0 = derive from thread_percentage)
    pub workers: usize,

    /// Percentage of CPU cores to use when deriving the worker count (1-100)
    pub thread_percentage: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alphabet: "ABCDEFGHIJKLMNOPQRSTUVWXYZ_".to_string(),
            max_length: 7,
            prefix: "OBJLIST_CRAFT_".to_string(),
            target_hash: TargetHash(0x5217_EA61),
            seed: 0,
            parallel: false,
            workers: 0,
            thread_percentage: 75,
        }
    }
}

impl SearchConfig {
    /// Checks that don't need the search engine. Alphabet and search-space
    /// limits are checked when the engine is built from this config.
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            bail!("max_length must be at least 1");
        }
        if self.max_length > MAX_LENGTH_LIMIT {
            bail!(
                "max_length must be at most {MAX_LENGTH_LIMIT}, got {}",
                self.max_length
            );
        }
        if !(1..=100).contains(&self.thread_percentage) {
            bail!(
                "thread_percentage must be between 1 and 100, got {}",
                self.thread_percentage
            );
        }
        Ok(())
    }
}

/// Values supplied on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_hash: Option<TargetHash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

/// 32-bit digest, written as hex (`0x5217EA61`) in config files and on the CLI.
///
/// Deserializes from either an integer or a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetHash(pub u32);

impl TargetHash {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for TargetHash {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() || digits.len() > 8 {
            bail!("Invalid target hash {s:?}: expected 1-8 hex digits");
        }

        u32::from_str_radix(digits, 16)
            .map(TargetHash)
            .with_context(|| format!("Invalid target hash {s:?}: expected 1-8 hex digits"))
    }
}

impl fmt::Display for TargetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl Serialize for TargetHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TargetHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(value) => u32::try_from(value)
                .map(TargetHash)
                .map_err(|_| serde::de::Error::custom(format!("target hash {value} does not fit in 32 bits"))),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
