//! Hash primitives used by the search oracle and the `hash` command.

pub mod murmur3;

pub use murmur3::{Murmur3, murmur3_32};

/// Format a digest the way hash tables list them: 8 uppercase hex digits.
pub fn format_hash(hash: u32) -> String {
    format!("{hash:08X}")
}
