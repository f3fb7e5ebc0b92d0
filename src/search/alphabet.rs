use anyhow::{Result, bail};
use std::fmt;

/// Ordered set of symbols a candidate may be built from.
///
/// Symbols are single ASCII bytes so a candidate is always valid UTF-8 and
/// its byte length equals its character length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
}

impl Alphabet {
    /// Upper-case letters plus underscore, the symbol set of identifier-style names.
    pub const DEFAULT: &'static str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ_";

    pub fn new(symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            bail!("Alphabet must contain at least one symbol");
        }
        if let Some(c) = symbols.chars().find(|c| !c.is_ascii()) {
            bail!("Alphabet symbol {c:?} is not ASCII");
        }

        let bytes = symbols.as_bytes();
        for (i, symbol) in bytes.iter().enumerate() {
            if bytes[..i].contains(symbol) {
                bail!("Alphabet symbol {:?} appears more than once", *symbol as char);
            }
        }

        Ok(Self {
            symbols: bytes.to_vec(),
        })
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_str(&self) -> &str {
        // Validated as ASCII on construction
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: Self::DEFAULT.as_bytes().to_vec(),
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
