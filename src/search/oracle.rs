use serde::Serialize;

use crate::hash::Murmur3;

/// A candidate whose prefixed hash equals the target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Match {
    pub length: usize,
    pub candidate: String,
    pub prefixed: String,
    pub hash: u32,
}

/// Hash-and-compare step applied to every candidate.
///
/// The prefix is absorbed into a hasher state once at construction; each
/// check copies that state and feeds only the candidate bytes.
#[derive(Debug, Clone)]
pub struct Oracle {
    prefix: String,
    primed: Murmur3,
    target: u32,
}

impl Oracle {
    pub fn new(prefix: impl Into<String>, target: u32, seed: u32) -> Self {
        let prefix = prefix.into();
        let mut primed = Murmur3::with_seed(seed);
        primed.update(prefix.as_bytes());
        Self {
            prefix,
            primed,
            target,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// MurmurHash3 of `prefix ++ candidate`.
    #[inline]
    pub fn hash(&self, candidate: &[u8]) -> u32 {
        let mut hasher = self.primed;
        hasher.update(candidate);
        hasher.finish32()
    }

    /// Returns the match when `candidate` hits the target.
    #[inline]
    pub fn check(&self, candidate: &[u8]) -> Option<Match> {
        let hash = self.hash(candidate);
        if hash != self.target {
            return None;
        }

        let candidate = String::from_utf8_lossy(candidate).into_owned();
        Some(Match {
            length: candidate.len(),
            prefixed: format!("{}{}", self.prefix, candidate),
            candidate,
            hash,
        })
    }
}
