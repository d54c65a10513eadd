//! Single-owner duplicate resolution.
//!
//! # Overview
//!
//! [`DedupStage`] is the only code that reads or writes the
//! [`FingerprintIndex`]. It runs on one thread and consumes hashed files in
//! arrival order. For every file it either records the fingerprint as new
//! or, if the fingerprint is already known, picks which of the two files to
//! keep and emits the other as a delete decision.
//!
//! # Keep/delete rule
//!
//! The file whose parent directory path is the strictly longer string is
//! deleted. On a tie the file already in the index is kept. Only the two
//! records sharing a fingerprint are compared, so the outcome does not
//! depend on how records from different workers interleave.
//!
//! ```
//! use dupesweep::duplicates::{DedupStage, FileRecord};
//! use dupesweep::scanner::FileEntry;
//!
//! let mut stage = DedupStage::new();
//! let fp = [7u8; 32];
//!
//! assert!(stage.process(FileRecord::new(FileEntry::new("ab/x.txt", 3), fp)).is_none());
//! let deleted = stage.process(FileRecord::new(FileEntry::new("a/x.txt", 3), fp)).unwrap();
//! assert_eq!(deleted.path, std::path::Path::new("ab/x.txt"));
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use crossbeam_channel::{Receiver, Sender};

use super::{FileRecord, Tally};
use crate::scanner::Hash;

/// Length of the directory portion of `path`, in bytes.
///
/// A bare file name lives in `.`, so its directory length is 1.
#[must_use]
pub fn directory_len(path: &Path) -> usize {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.as_os_str().len(),
        _ => 1,
    }
}

/// Fingerprint to retained file. At most one entry per fingerprint.
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    entries: HashMap<Hash, FileRecord>,
}

impl FingerprintIndex {
    /// Number of distinct fingerprints seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no file has been indexed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The retained file for `fingerprint`, if any.
    #[must_use]
    pub fn get(&self, fingerprint: &Hash) -> Option<&FileRecord> {
        self.entries.get(fingerprint)
    }

    /// Iterate over the retained files.
    pub fn retained(&self) -> impl Iterator<Item = &FileRecord> {
        self.entries.values()
    }
}

/// Final state of the dedup stage.
#[derive(Debug)]
pub struct DedupOutcome {
    /// Every file that reached the stage, duplicates included
    pub scanned: Tally,
    /// The retained file for each distinct fingerprint
    pub index: FingerprintIndex,
}

/// The dedup decision loop and the state it owns.
#[derive(Debug, Default)]
pub struct DedupStage {
    index: FingerprintIndex,
    scanned: Tally,
}

impl DedupStage {
    /// Create a stage with an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one hashed file and resolve it against the index.
    ///
    /// Returns the file to delete when `record` duplicates a known
    /// fingerprint, or `None` when the fingerprint is new.
    pub fn process(&mut self, record: FileRecord) -> Option<FileRecord> {
        self.scanned.record(record.size);

        match self.index.entries.entry(record.fingerprint) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                None
            }
            Entry::Occupied(mut slot) => {
                if directory_len(&slot.get().path) > directory_len(&record.path) {
                    // The newcomer takes the slot; the old entry goes.
                    Some(slot.insert(record))
                } else {
                    Some(record)
                }
            }
        }
    }

    /// Files accounted for so far.
    #[must_use]
    pub fn scanned(&self) -> Tally {
        self.scanned
    }

    /// Read-only view of the index.
    #[must_use]
    pub fn index(&self) -> &FingerprintIndex {
        &self.index
    }

    /// Consume `intake` until it closes, sending delete decisions to `decisions`.
    ///
    /// `decisions` is closed before the outcome is returned.
    pub fn run(mut self, intake: Receiver<FileRecord>, decisions: Sender<FileRecord>) -> DedupOutcome {
        let mut deletion_gone = false;

        for record in intake.iter() {
            let Some(duplicate) = self.process(record) else {
                continue;
            };

            log::debug!("Duplicate: {}", duplicate.path.display());
            if deletion_gone {
                continue;
            }
            if decisions.send(duplicate).is_err() {
                log::error!("Deletion stage is gone, further delete decisions are discarded");
                deletion_gone = true;
            }
        }
        drop(decisions);

        log::debug!(
            "Dedup finished: {} files, {} distinct",
            self.scanned.count,
            self.index.len()
        );
        DedupOutcome {
            scanned: self.scanned,
            index: self.index,
        }
    }
}
