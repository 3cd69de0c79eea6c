//! dupescan - Duplicate File Finder
//!
//! A Rust CLI application for finding files with identical content by direct
//! byte comparison, and reporting the file with the most copies and the file
//! whose copies waste the most disk space.
//!
//! Two grouping strategies are available (see [`duplicates::Strategy`]); by
//! default both run back to back so their runtimes can be compared.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod report;
pub mod scanner;

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::time::Instant;

use cli::{Cli, OutputFormat};
use duplicates::{DuplicateFinder, FinderConfig};
use error::ExitCode;
use report::{JsonOutput, RunReport, TextReport};
use scanner::WalkerConfig;

/// Run the application: set up logging, then scan and report to stdout.
///
/// # Errors
///
/// Returns an error if any scan is aborted or output cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

/// Scan `cli.path` once per selected strategy and write the reports to `out`.
///
/// In text mode each run is followed by its wall-clock runtime. In JSON mode
/// a single document covering all runs is written at the end.
///
/// # Errors
///
/// Returns an error if traversal, comparison or size lookup fails, or if
/// writing to `out` fails.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<ExitCode> {
    let base_config = FinderConfig::default()
        .with_walker_config(WalkerConfig::new(cli.skip_hidden))
        .with_buffer_size(cli.buffer_size);

    let mut json = JsonOutput::new(&cli.path);

    for (n, strategy) in cli.strategy.strategies().into_iter().enumerate() {
        log::info!("Running {} search on {}", strategy, cli.path.display());
        let finder = DuplicateFinder::new(base_config.clone().with_strategy(strategy));

        let started = Instant::now();
        let (groups, stats) = finder
            .find_duplicates(&cli.path)
            .with_context(|| format!("{} search of {} failed", strategy, cli.path.display()))?;
        let summary = report::summarize(&groups, finder.comparator())
            .context("Failed to build the duplicate report")?;

        match cli.output {
            OutputFormat::Text => {
                if n > 0 {
                    writeln!(out, "\n")?;
                }
                writeln!(out, "Search strategy: {strategy}")?;
                write!(out, "{}", TextReport::new(summary.as_ref()))?;
                writeln!(out, "Runtime: {:.2} seconds", started.elapsed().as_secs_f64())?;
            }
            OutputFormat::Json => {
                json.push(RunReport::new(strategy, started.elapsed(), stats, summary));
            }
        }
    }

    if cli.output == OutputFormat::Json {
        writeln!(out, "{}", json.to_json_pretty()?)?;
    }
    out.flush()?;

    Ok(ExitCode::Success)
}
