//! Duplicate detection pipeline.
//!
//! This module provides functionality for:
//! - Parallel fingerprinting of discovered files (the hashing workers)
//! - Single-owner duplicate resolution (the dedup stage)
//! - Wiring traversal, hashing, dedup and deletion into one run
//!
//! Stages hand records to each other over rendezvous channels, so a slow
//! stage stalls everything upstream of it.

pub mod dedup;
pub mod finder;
pub mod workers;

use std::path::PathBuf;

use crate::scanner::{FileEntry, Hash};

pub use dedup::{directory_len, DedupOutcome, DedupStage, FingerprintIndex};
pub use finder::{DuplicateFinder, FinderConfig, FinderError, RunSummary};
pub use workers::{HashingPool, PoolOutcome};

/// A file whose content has been fingerprinted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes, as listed by the traversal
    pub size: u64,
    /// Digest of the full file content
    pub fingerprint: Hash,
}

impl FileRecord {
    /// Attach a fingerprint to a discovered file.
    #[must_use]
    pub fn new(entry: FileEntry, fingerprint: Hash) -> Self {
        Self {
            path: entry.path,
            size: entry.size,
            fingerprint,
        }
    }
}

/// A running count of files and their combined size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Number of files recorded
    pub count: u64,
    /// Sum of recorded file sizes in bytes
    pub total_size: u64,
}

impl Tally {
    /// Record one file of `size` bytes.
    pub fn record(&mut self, size: u64) {
        self.count += 1;
        self.total_size = self.total_size.saturating_add(size);
    }
}
