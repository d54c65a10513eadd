//! dupesweep - concurrent duplicate file remover
//!
//! Walks a directory tree, fingerprints every regular file with a 256-bit
//! digest on a pool of hashing workers, and deletes all but one copy of
//! each set of identical files. A dry-run mode reports the same decisions
//! without touching the filesystem.

pub mod actions;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::actions::FsRemover;
use crate::cli::Cli;
use crate::duplicates::DuplicateFinder;
use crate::error::ExitCode;

/// Run the application against the current directory, reporting to stdout.
///
/// # Errors
///
/// Fails only if the pipeline cannot run or the report cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    run_in(&cli, Path::new("."), io::stdout())
}

/// Sweep `root` with the settings in `cli`, writing all report output to `out`.
///
/// # Errors
///
/// Fails only if the pipeline cannot run or the report cannot be written.
pub fn run_in<W: Write + Send>(cli: &Cli, root: &Path, mut out: W) -> Result<ExitCode> {
    let finder = DuplicateFinder::new(cli.finder_config());
    let summary = finder
        .scan_directory(root, FsRemover, &mut out)
        .context("duplicate sweep failed")?;

    output::write_summary(&mut out, &summary).context("failed to write summary")?;
    Ok(ExitCode::Success)
}
