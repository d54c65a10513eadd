//! Hashing worker pool.
//!
//! # Overview
//!
//! [`HashingPool`] owns a dedicated rayon thread pool with exactly one
//! thread per worker. Each worker is a long-lived task that pulls
//! [`FileEntry`] values from the shared intake, fingerprints the file and
//! pushes the resulting [`FileRecord`] downstream. There is no ordering
//! across workers: records leave the pool in completion order.
//!
//! A file that cannot be opened or read is logged and dropped. It is not
//! forwarded, so it never reaches any tally.
//!
//! The output sender is released only after every worker has returned,
//! which is what tells the dedup stage that no more records will arrive.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender};

use super::FileRecord;
use crate::scanner::{FileEntry, Hasher};

/// Counters reported by the pool once every worker has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolOutcome {
    /// Files fingerprinted and forwarded downstream
    pub hashed: u64,
    /// Files dropped because they could not be read
    pub failures: u64,
}

/// Fixed-size pool of hashing workers.
pub struct HashingPool {
    workers: usize,
    hasher: Hasher,
    pool: rayon::ThreadPool,
}

impl std::fmt::Debug for HashingPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashingPool")
            .field("workers", &self.workers)
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl HashingPool {
    /// Build a pool with `workers` threads (at least one).
    ///
    /// # Errors
    ///
    /// Returns the rayon error if the threads cannot be started.
    pub fn new(workers: usize, hasher: Hasher) -> Result<Self, rayon::ThreadPoolBuildError> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("dupesweep-hash-{i}"))
            .build()?;

        Ok(Self {
            workers,
            hasher,
            pool,
        })
    }

    /// Number of workers in the pool.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Drain `intake` with all workers, sending fingerprinted files to `output`.
    ///
    /// Blocks until the intake is closed and every worker has returned.
    /// `output` is dropped before this returns.
    pub fn run(&self, intake: Receiver<FileEntry>, output: Sender<FileRecord>) -> PoolOutcome {
        let hashed = AtomicU64::new(0);
        let failures = AtomicU64::new(0);

        // The scope is the join barrier across all workers.
        self.pool.scope(|scope| {
            for id in 0..self.workers {
                let intake = intake.clone();
                let output = output.clone();
                let hasher = self.hasher;
                let (hashed, failures) = (&hashed, &failures);

                scope.spawn(move |_| {
                    let outcome = hash_worker(id, hasher, &intake, &output);
                    hashed.fetch_add(outcome.hashed, Ordering::Relaxed);
                    failures.fetch_add(outcome.failures, Ordering::Relaxed);
                });
            }
        });
        drop(output);

        let outcome = PoolOutcome {
            hashed: hashed.into_inner(),
            failures: failures.into_inner(),
        };
        log::debug!(
            "Hashing pool finished: {} hashed, {} failed",
            outcome.hashed,
            outcome.failures
        );
        outcome
    }
}

/// Body of a single worker.
fn hash_worker(
    id: usize,
    hasher: Hasher,
    intake: &Receiver<FileEntry>,
    output: &Sender<FileRecord>,
) -> PoolOutcome {
    let mut outcome = PoolOutcome::default();

    for entry in intake.iter() {
        let fingerprint = match hasher.full_hash(&entry.path) {
            Ok(hash) => hash,
            Err(e) => {
                log::warn!("Failed to hash {}: {}", entry.path.display(), e);
                outcome.failures += 1;
                continue;
            }
        };

        log::trace!(
            "worker {id}: {} {}",
            hex::encode(fingerprint),
            entry.path.display()
        );

        if output.send(FileRecord::new(entry, fingerprint)).is_err() {
            log::error!("worker {id}: dedup stage is gone, stopping");
            break;
        }
        outcome.hashed += 1;
    }

    outcome
}
