//! Pipeline wiring for a full duplicate sweep.
//!
//! # Overview
//!
//! [`DuplicateFinder::run`] connects four stages with rendezvous channels:
//!
//! 1. **Traversal**: the caller's file source, driven on the calling thread
//! 2. **Hashing**: [`HashingPool`], N workers sharing one intake
//! 3. **Dedup**: [`DedupStage`], the sole owner of the fingerprint index
//! 4. **Deletion**: [`DeletionStage`], the sole writer of per-file output
//!
//! Every channel has zero capacity, so each handoff blocks until the next
//! stage takes the item. Shutdown cascades downstream: the intake closes when
//! traversal ends, the hashed channel when all workers have returned, and the
//! decision channel when the dedup stage drains.
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::actions::FsRemover;
//! use dupesweep::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_dry_run(true));
//! let summary = finder
//!     .scan_directory(Path::new("."), FsRemover, std::io::stdout())
//!     .unwrap();
//! println!("{} duplicates", summary.deleted.count);
//! ```

use std::io::{self, Write};
use std::path::Path;
use std::thread::{self, Scope, ScopedJoinHandle};

use bytesize::ByteSize;
use crossbeam_channel::bounded;

use super::{DedupStage, FileRecord, HashingPool, Tally};
use crate::actions::{DeletionStage, Remover};
use crate::scanner::{FileEntry, HashAlgorithm, Hasher, Walker};

/// Default number of hashing workers.
pub const DEFAULT_WORKERS: usize = 8;

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Number of hashing workers (at least 1).
    pub workers: usize,
    /// Report delete decisions without removing anything.
    pub dry_run: bool,
    /// Digest used for fingerprints.
    pub algorithm: HashAlgorithm,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            dry_run: false,
            algorithm: HashAlgorithm::default(),
        }
    }
}

impl FinderConfig {
    /// Set the number of hashing workers.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Enable or disable dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the fingerprint digest.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files that were hashed and reached the dedup stage
    pub scanned: Tally,
    /// Delete decisions, whether or not removal succeeded
    pub deleted: Tally,
    /// Distinct fingerprints, i.e. files retained
    pub unique_files: usize,
    /// Files dropped because they could not be read
    pub hash_failures: u64,
    /// Live removals that failed
    pub delete_failures: u64,
}

impl RunSummary {
    /// Whether every file was hashed and every removal succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.hash_failures == 0 && self.delete_failures == 0
    }
}

/// Errors that stop a run.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// The hashing thread pool could not be built.
    #[error("failed to start hashing workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A stage thread could not be spawned.
    #[error("failed to spawn {stage} stage: {source}")]
    Spawn {
        stage: &'static str,
        #[source]
        source: io::Error,
    },

    /// A stage thread panicked.
    ///
    /// Requires unwinding; a build with `panic = "abort"` ends the process
    /// instead.
    #[error("{0} stage panicked")]
    StagePanicked(&'static str),
}

/// Runs the hashing, dedup and deletion stages over a file source.
#[derive(Debug, Clone, Default)]
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a finder with default configuration (8 workers, live mode).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Sweep every regular file under `root`.
    ///
    /// # Errors
    ///
    /// See [`DuplicateFinder::run`].
    pub fn scan_directory<R, W>(
        &self,
        root: &Path,
        remover: R,
        out: W,
    ) -> Result<RunSummary, FinderError>
    where
        R: Remover + Send,
        W: Write + Send,
    {
        log::info!("Scanning {}", root.display());
        self.run(Walker::new(root).files(), remover, out)
    }

    /// Feed `source` through the pipeline and wait for both final tallies.
    ///
    /// Per-file lines for delete decisions go to `out`. Unreadable files and
    /// failed removals are logged, never fatal.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] only if the stage threads cannot be started
    /// or one of them panics.
    pub fn run<I, R, W>(&self, source: I, remover: R, out: W) -> Result<RunSummary, FinderError>
    where
        I: IntoIterator<Item = FileEntry>,
        R: Remover + Send,
        W: Write + Send,
    {
        let hasher = Hasher::with_algorithm(self.config.algorithm);
        let pool = HashingPool::new(self.config.workers, hasher)?;
        let deletion = DeletionStage::new(self.config.dry_run, remover, out);

        log::info!(
            "Hashing with {} workers ({}){}",
            pool.workers(),
            self.config.algorithm,
            if self.config.dry_run { ", dry run" } else { "" }
        );

        let (intake_tx, intake_rx) = bounded::<FileEntry>(0);
        let (hashed_tx, hashed_rx) = bounded::<FileRecord>(0);
        let (delete_tx, delete_rx) = bounded::<FileRecord>(0);

        thread::scope(|scope| -> Result<RunSummary, FinderError> {
            let hashing = spawn_stage(scope, "hashing", move || pool.run(intake_rx, hashed_tx))?;
            let dedup = spawn_stage(scope, "dedup", move || {
                DedupStage::new().run(hashed_rx, delete_tx)
            })?;
            let deleting = spawn_stage(scope, "deletion", move || deletion.run(delete_rx))?;

            let mut submitted = 0u64;
            for entry in source {
                if intake_tx.send(entry).is_err() {
                    log::error!("Hashing workers stopped before traversal finished");
                    break;
                }
                submitted += 1;
            }
            drop(intake_tx);
            log::debug!("Traversal finished: {} files submitted", submitted);

            // Join all stages before inspecting any result.
            let hashing = hashing.join();
            let dedup = dedup.join();
            let deleting = deleting.join();

            let pool = hashing.map_err(|_| FinderError::StagePanicked("hashing"))?;
            let dedup = dedup.map_err(|_| FinderError::StagePanicked("dedup"))?;
            let deleting = deleting.map_err(|_| FinderError::StagePanicked("deletion"))?;

            let summary = RunSummary {
                scanned: dedup.scanned,
                deleted: deleting.deleted,
                unique_files: dedup.index.len(),
                hash_failures: pool.failures,
                delete_failures: deleting.failures,
            };
            log::info!(
                "Scanned {} files ({}), {} duplicates ({})",
                summary.scanned.count,
                ByteSize::b(summary.scanned.total_size),
                summary.deleted.count,
                ByteSize::b(summary.deleted.total_size)
            );
            Ok(summary)
        })
    }
}

/// Spawn a named stage thread inside `scope`.
fn spawn_stage<'scope, 'env, T, F>(
    scope: &'scope Scope<'scope, 'env>,
    stage: &'static str,
    f: F,
) -> Result<ScopedJoinHandle<'scope, T>, FinderError>
where
    F: FnOnce() -> T + Send + 'scope,
    T: Send + 'scope,
{
    thread::Builder::new()
        .name(format!("dupesweep-{stage}"))
        .spawn_scoped(scope, f)
        .map_err(|source| FinderError::Spawn { stage, source })
}
