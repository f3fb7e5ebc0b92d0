//! Command-line interface for hashcrack

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::Output;
