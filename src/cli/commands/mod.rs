use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cli::output::Output;

pub mod hash;
pub mod search;
pub mod version;

#[derive(Parser)]
#[command(
    name = "hashcrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Brute-force MurmurHash3 preimage search over bounded-length strings",
    long_about = "hashcrack enumerates every string over an alphabet up to a maximum length, \
                  hashes each one with MurmurHash3 (x86, 32-bit) after a fixed prefix, and \
                  reports every candidate whose hash equals the target. Running without a \
                  subcommand searches the built-in configuration."
)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output (matches are still printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file (.toml, .json, .yaml)
    #[arg(long, value_name = "FILE", env = "HASHCRACK_CONFIG", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for candidates whose prefixed hash equals the target
    Search(search::SearchArgs),
    /// Print MurmurHash3 digests of names as HASH,NAME lines
    Hash(hash::HashArgs),
    /// Show version information
    Version(version::VersionArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Some(Commands::Search(args)) => search::execute(args, output, self.config.as_deref()).await,
            Some(Commands::Hash(args)) => hash::execute(args).await,
            Some(Commands::Version(args)) => version::execute(args).await,
            // No arguments: run the built-in search
            None => search::execute(search::SearchArgs::default(), output, self.config.as_deref()).await,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs go to stderr so stdout only carries results
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
