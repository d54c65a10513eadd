//! Command-line interface definitions for dupesweep.
//!
//! The tool always sweeps the current directory. `--dry` is the only flag
//! that changes what happens to files; the rest tune logging and hashing.
//!
//! # Example
//!
//! ```bash
//! # Report what would be deleted
//! dupesweep --dry
//!
//! # Delete duplicates with 4 hashing workers and debug logging
//! dupesweep -v --workers 4
//! ```

use clap::{Parser, ValueEnum};

use crate::duplicates::finder::DEFAULT_WORKERS;
use crate::duplicates::FinderConfig;
use crate::scanner::HashAlgorithm;

/// Find files with identical content under the current directory and
/// delete all but one copy of each.
///
/// Of two identical files, the one whose directory path is longer is
/// deleted; on a tie the file seen first is kept.
#[derive(Debug, Parser)]
#[command(name = "dupesweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Only print the files that would be deleted; remove nothing
    #[arg(long, visible_alias = "dry-run")]
    pub dry: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Number of parallel hashing workers
    #[arg(short = 'j', long, value_name = "N", default_value_t = DEFAULT_WORKERS, value_parser = parse_workers)]
    pub workers: usize,

    /// Content digest used to fingerprint files
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Blake3)]
    pub algorithm: AlgorithmArg,
}

impl Cli {
    /// Pipeline configuration selected by these arguments.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_workers(self.workers)
            .with_dry_run(self.dry)
            .with_algorithm(self.algorithm.into())
    }
}

/// Digest choices accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// BLAKE3 (fast, default)
    Blake3,
    /// SHA-256
    Sha256,
}

impl From<AlgorithmArg> for HashAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Blake3 => Self::Blake3,
            AlgorithmArg::Sha256 => Self::Sha256,
        }
    }
}

/// Parse a worker count, rejecting zero.
///
/// # Errors
///
/// Returns an error message if the value is not a positive integer.
pub fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid worker count: '{s}'"))?;
    if n == 0 {
        return Err("worker count must be at least 1".to_string());
    }
    Ok(n)
}
