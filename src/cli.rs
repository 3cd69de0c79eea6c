//! Command-line interface definitions for dupescan.
//!
//! This module defines all CLI arguments using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Scan ./images with both strategies and compare their runtimes
//! dupescan
//!
//! # Scan a specific directory with the size-filtered strategy only
//! dupescan ~/Pictures --strategy size-filtered
//!
//! # JSON output for scripting
//! dupescan ~/Pictures --output json
//!
//! # Verbose mode for debugging
//! dupescan -vv ~/Pictures
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::duplicates::Strategy;
use crate::scanner::MAX_BUFFER_SIZE;

/// Find files with identical content and report the biggest offenders.
///
/// dupescan groups files by exact byte content, then reports the file with
/// the most copies and the file whose copies waste the most space.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(value_name = "PATH", env = "DUPESCAN_ROOT", default_value = "images")]
    pub path: PathBuf,

    /// Grouping strategy to run
    #[arg(short, long, value_enum, default_value = "both")]
    pub strategy: StrategyArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Read buffer size for content comparison (e.g., 64KiB, 1MiB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB. Must be between
    /// 1 byte and 64MiB.
    #[arg(
        long,
        value_name = "SIZE",
        value_parser = parse_buffer_size,
        default_value = "64KiB"
    )]
    pub buffer_size: usize,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Which grouping strategies to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Full content comparison, stop at the first mismatch
    Baseline,
    /// Size check first, stop only at a size mismatch
    SizeFiltered,
    /// Baseline, then size-filtered, for comparison
    Both,
}

impl StrategyArg {
    /// Strategies to run, in execution order.
    #[must_use]
    pub fn strategies(self) -> Vec<Strategy> {
        match self {
            Self::Baseline => vec![Strategy::Baseline],
            Self::SizeFiltered => vec![Strategy::SizeFiltered],
            Self::Both => vec![Strategy::Baseline, Strategy::SizeFiltered],
        }
    }
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text report with runtimes
    Text,
    /// JSON document for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB.
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupescan::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("64KiB").unwrap(), 65_536);
/// assert_eq!(parse_size("1MB").unwrap(), 1_000_000);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}

/// Parse a comparison buffer size, rejecting values outside
/// `1..=MAX_BUFFER_SIZE`.
///
/// # Errors
///
/// Returns an error for anything [`parse_size`] rejects, and for sizes of
/// zero or above 64 MiB.
pub fn parse_buffer_size(s: &str) -> Result<usize, String> {
    let bytes = parse_size(s)?;
    match usize::try_from(bytes) {
        Ok(size) if (1..=MAX_BUFFER_SIZE).contains(&size) => Ok(size),
        _ => Err(format!(
            "Buffer size must be between 1B and 64MiB, got {bytes} bytes"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("0").unwrap(), 0);
        assert_eq!(parse_size("512B").unwrap(), 512);
        assert_eq!(parse_size("1kib").unwrap(), 1_024);
        assert_eq!(parse_size("1.5MB").unwrap(), 1_500_000);
        assert_eq!(parse_size(" 2 MiB ").unwrap(), 2_097_152);
        assert_eq!(parse_size("1GiB").unwrap(), 1_073_741_824);
    }

    #[test]
    fn test_parse_size_errors() {
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("1XB").is_err());
        assert!(parse_size("-1MB").is_err());
    }

    #[test]
    fn test_parse_buffer_size_bounds() {
        assert_eq!(parse_buffer_size("1").unwrap(), 1);
        assert_eq!(parse_buffer_size("64MiB").unwrap(), MAX_BUFFER_SIZE);
        assert!(parse_buffer_size("0").is_err());
        assert!(parse_buffer_size("64MiB1").is_err());
        assert!(parse_buffer_size("67108865").is_err());
        assert!(parse_buffer_size("100000GiB").is_err());
    }

    #[test]
    fn test_cli_rejects_out_of_range_buffer_size() {
        for size in ["0", "0B", "67108865", "100000GiB"] {
            let result = Cli::try_parse_from(["dupescan", "/path", "--buffer-size", size]);
            assert!(result.is_err(), "{size} should be rejected");
        }

        let cli = Cli::try_parse_from(["dupescan", "/path", "--buffer-size", "1B"]).unwrap();
        assert_eq!(cli.buffer_size, 1);
        let cli = Cli::try_parse_from(["dupescan", "/path", "--buffer-size", "64MiB"]).unwrap();
        assert_eq!(cli.buffer_size, MAX_BUFFER_SIZE);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["dupescan"]).unwrap();
        // DUPESCAN_ROOT may be set in the environment running the tests.
        if std::env::var_os("DUPESCAN_ROOT").is_none() {
            assert_eq!(cli.path, PathBuf::from("images"));
        }
        assert_eq!(cli.strategy, StrategyArg::Both);
        assert_eq!(cli.output, OutputFormat::Text);
        assert_eq!(cli.buffer_size, 65_536);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(!cli.skip_hidden);
    }

    #[test]
    fn test_cli_parse_all_options() {
        let cli = Cli::try_parse_from([
            "dupescan",
            "-vv",
            "/photos",
            "--strategy",
            "size-filtered",
            "--output",
            "json",
            "--skip-hidden",
            "--buffer-size",
            "1MiB",
            "--json-errors",
        ])
        .unwrap();

        assert_eq!(cli.path, PathBuf::from("/photos"));
        assert_eq!(cli.strategy, StrategyArg::SizeFiltered);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.skip_hidden);
        assert_eq!(cli.buffer_size, 1_048_576);
        assert_eq!(cli.verbose, 2);
        assert!(cli.json_errors);
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["dupescan", "-v", "-q", "/path"]).is_err());
    }

    #[test]
    fn test_cli_invalid_strategy() {
        assert!(Cli::try_parse_from(["dupescan", "--strategy", "hash"]).is_err());
    }

    #[test]
    fn test_strategy_arg_expansion() {
        assert_eq!(StrategyArg::Baseline.strategies(), vec![Strategy::Baseline]);
        assert_eq!(
            StrategyArg::SizeFiltered.strategies(),
            vec![Strategy::SizeFiltered]
        );
        assert_eq!(
            StrategyArg::Both.strategies(),
            vec![Strategy::Baseline, Strategy::SizeFiltered]
        );
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
