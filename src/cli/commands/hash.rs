//! Hash command: list MurmurHash3 digests for known names, one `HASH,NAME`
//! line each. Useful for building lookup tables of already-known hashes.

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::hash::{format_hash, murmur3_32};

#[derive(Args)]
pub struct HashArgs {
    /// Names to hash (reads one name per line from stdin when omitted)
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Literal prepended to every name before hashing
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// MurmurHash3 seed
    #[arg(long, default_value_t = 0)]
    pub seed: u32,
}

pub async fn execute(args: HashArgs) -> Result<()> {
    let names = if args.names.is_empty() {
        read_names_from_stdin().await?
    } else {
        args.names
    };

    for name in &names {
        println!("{}", hash_line(&args.prefix, name, args.seed));
    }
    Ok(())
}

/// `HHHHHHHH,<prefix><name>` with the digest as 8 uppercase hex digits.
pub fn hash_line(prefix: &str, name: &str, seed: u32) -> String {
    let full = format!("{prefix}{name}");
    format!("{},{}", format_hash(murmur3_32(full.as_bytes(), seed)), full)
}

async fn read_names_from_stdin() -> Result<Vec<String>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut names = Vec::new();

    while let Some(line) = lines.next_line().await.context("Failed to read names from stdin")? {
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }

    tracing::debug!("Read {} names from stdin", names.len());
    Ok(names)
}
