//! Search command: runs the brute-force search with console reporting.

use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;

use crate::cli::output::Output;
use crate::config::{SearchConfig, SearchOverrides, TargetHash};
use crate::parallel::LengthProgress;
use crate::search::{HashSearch, LengthReport, Match, SearchReporter, SearchSummary};

/// Searches beyond this many candidates get a heads-up before starting
const LONG_SEARCH_CANDIDATES: u64 = 1_000_000_000;

#[derive(Args, Default)]
pub struct SearchArgs {
    /// Symbols candidates are built from, in enumeration order
    #[arg(long)]
    pub alphabet: Option<String>,

    /// Longest candidate length to search
    #[arg(short = 'n', long)]
    pub max_length: Option<usize>,

    /// Literal prepended to every candidate before hashing
    #[arg(long)]
    pub prefix: Option<String>,

    /// Target hash in hex, e.g. 0x5217EA61
    #[arg(short, long)]
    pub target: Option<TargetHash>,

    /// MurmurHash3 seed
    #[arg(long)]
    pub seed: Option<u32>,

    /// Search lengths concurrently, one worker per length
    #[arg(long)]
    pub parallel: bool,

    /// Maximum worker threads for --parallel (0 = auto)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Show a progress bar per length
    #[arg(long)]
    pub progress: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Match lines, per-length markers and a closing summary
    #[default]
    Summary,
    /// Only the final summary as JSON
    Json,
}

impl SearchArgs {
    fn overrides(&self) -> SearchOverrides {
        SearchOverrides {
            alphabet: self.alphabet.clone(),
            max_length: self.max_length,
            prefix: self.prefix.clone(),
            target_hash: self.target,
            seed: self.seed,
            // A missing flag must not override a config file that enables it
            parallel: self.parallel.then_some(true),
            workers: self.workers,
        }
    }
}

/// Streams search events to the terminal.
struct ConsoleReporter {
    output: Output,
    progress: Option<LengthProgress>,
    format: OutputFormat,
}

impl ConsoleReporter {
    fn print<F: FnOnce()>(&self, print: F) {
        match &self.progress {
            Some(progress) => progress.suspend(print),
            None => print(),
        }
    }

    fn finish(&self) {
        if let Some(progress) = &self.progress {
            progress.finish();
        }
    }
}

impl SearchReporter for ConsoleReporter {
    fn on_match(&self, found: &Match) {
        tracing::info!("Match at length {}: {}", found.length, found.prefixed);
        if self.format == OutputFormat::Summary {
            self.print(|| self.output.found(&found.prefixed));
        }
    }

    fn on_progress(&self, length: usize, checked: u64) {
        if let Some(progress) = &self.progress {
            progress.set_checked(length, checked);
        }
    }

    fn on_length_complete(&self, report: &LengthReport) {
        if let Some(progress) = &self.progress {
            progress.set_checked(report.length, report.candidates_checked);
            progress.finish_length(report.length, report.matches.len());
        }
        if self.format == OutputFormat::Summary {
            self.print(|| {
                self.output.success(&format!(
                    "Length {} complete: {} candidates, {} matches ({}ms)",
                    report.length,
                    report.candidates_checked,
                    report.matches.len(),
                    report.elapsed_ms
                ))
            });
        }
    }
}

pub async fn execute(args: SearchArgs, output: Output, config_path: Option<&str>) -> Result<()> {
    let config = SearchConfig::load(config_path, Some(&args.overrides()))?;
    let search = HashSearch::from_config(&config)?;

    let summary_output = args.format == OutputFormat::Summary;
    if summary_output {
        print_plan(&search, &config, output);
    }

    let show_progress = args.progress && summary_output && !output.is_quiet();
    let reporter = Arc::new(ConsoleReporter {
        output,
        progress: show_progress.then(|| LengthProgress::new(&search.plan_sizes())),
        format: args.format,
    });

    let task_reporter: Arc<dyn SearchReporter> = reporter.clone();
    let summary = tokio::task::spawn_blocking(move || search.run(task_reporter))
        .await
        .context("Search task failed")??;

    reporter.finish();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Summary => print_summary(&summary, output),
    }

    Ok(())
}

fn print_plan(search: &HashSearch, config: &SearchConfig, output: Output) {
    output.header("hashcrack search");
    output.key_value("Alphabet", search.alphabet().as_str(), false);
    output.key_value("Lengths", &format!("1..={}", search.max_length()), false);
    output.key_value("Prefix", search.oracle().prefix(), false);
    output.key_value("Target", &config.target_hash.to_string(), true);
    output.key_value("Seed", &config.seed.to_string(), false);
    output.key_value("Strategy", &search.strategy().to_string(), false);
    output.blank_line();

    let total: u64 = search
        .plan_sizes()
        .iter()
        .fold(0u64, |acc, (_, size)| acc.saturating_add(*size));
    if total > LONG_SEARCH_CANDIDATES {
        output.warning(&format!("{total} candidates to check, this will take a while"));
    }
}

fn print_summary(summary: &SearchSummary, output: Output) {
    output.blank_line();
    output.info(&format!(
        "Checked {} candidates in {:.2}s",
        summary.total_candidates,
        summary.elapsed_ms as f64 / 1000.0
    ));
    output.verbose(&format!("Throughput: {:.0} candidates/s", summary.throughput()));

    if summary.matches.is_empty() {
        output.info("No matches found");
    } else {
        output.success(&format!("{} match(es) found", summary.matches.len()));
    }
}
