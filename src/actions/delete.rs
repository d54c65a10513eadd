//! Deletion stage and the file removal it drives.
//!
//! # Overview
//!
//! [`DeletionStage`] consumes delete decisions in the order the dedup stage
//! emits them. Each decision is counted first, then either carried out
//! through a [`Remover`] (live mode) or only reported (dry-run mode).
//!
//! The deleted tally counts decisions, not confirmed removals: a file whose
//! removal fails is still counted. Failures are logged and counted
//! separately in [`DeletionOutcome::failures`].
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::actions::delete::{FsRemover, Remover};
//! use std::path::Path;
//!
//! let mut remover = FsRemover;
//! if let Err(e) = remover.remove(Path::new("/path/to/duplicate.txt")) {
//!     eprintln!("Failed: {}", e);
//! }
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use crossbeam_channel::Receiver;
use thiserror::Error;

use crate::duplicates::{FileRecord, Tally};

/// Line prefix for a file removed in live mode.
pub const LIVE_PREFIX: &str = "Deleting file:";

/// Line prefix for a file that would be removed in dry-run mode.
pub const DRY_RUN_PREFIX: &str = "*Deleting file:";

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }

    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// The side effect the deletion stage drives in live mode.
pub trait Remover {
    /// Remove the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DeleteError`] if the file could not be removed.
    fn remove(&mut self, path: &Path) -> Result<(), DeleteError>;
}

/// Removes files from the filesystem permanently.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove(&mut self, path: &Path) -> Result<(), DeleteError> {
        permanent_delete(path)
    }
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `Io` for any other failure
pub fn permanent_delete(path: &Path) -> Result<(), DeleteError> {
    fs::remove_file(path).map_err(|e| DeleteError::from_io(path, e))?;
    log::debug!("Permanently deleted: {}", path.display());
    Ok(())
}

/// Final state of the deletion stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionOutcome {
    /// Every delete decision received
    pub deleted: Tally,
    /// Live removals that failed
    pub failures: u64,
}

/// Consumer of delete decisions.
///
/// `out` receives one line per decision; it is the only per-file output
/// the pipeline produces.
#[derive(Debug)]
pub struct DeletionStage<R, W> {
    dry_run: bool,
    remover: R,
    out: W,
    outcome: DeletionOutcome,
}

impl<R: Remover, W: Write> DeletionStage<R, W> {
    /// Create a stage. With `dry_run` set, `remover` is never called.
    #[must_use]
    pub fn new(dry_run: bool, remover: R, out: W) -> Self {
        Self {
            dry_run,
            remover,
            out,
            outcome: DeletionOutcome::default(),
        }
    }

    /// Count, report and (in live mode) remove one file.
    pub fn handle(&mut self, record: &FileRecord) {
        self.outcome.deleted.record(record.size);

        let prefix = if self.dry_run {
            DRY_RUN_PREFIX
        } else {
            LIVE_PREFIX
        };
        if let Err(e) = writeln!(self.out, "{} {}", prefix, record.path.display()) {
            log::warn!("Failed to write report line: {}", e);
        }

        if self.dry_run {
            return;
        }
        if let Err(e) = self.remover.remove(&record.path) {
            log::error!("Failed to delete {}: {}", e.path().display(), e);
            self.outcome.failures += 1;
        }
    }

    /// Handle decisions until `decisions` closes.
    pub fn run(mut self, decisions: Receiver<FileRecord>) -> DeletionOutcome {
        for record in decisions.iter() {
            self.handle(&record);
        }

        if let Err(e) = self.out.flush() {
            log::warn!("Failed to flush report output: {}", e);
        }

        let deleted = self.outcome.deleted;
        log::debug!(
            "Deletion finished: {} files, {}{}",
            deleted.count,
            ByteSize::b(deleted.total_size),
            if self.dry_run { " (dry run)" } else { "" }
        );
        self.outcome
    }
}
