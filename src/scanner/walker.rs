//! Directory walker implementation using jwalk.
//!
//! # Overview
//!
//! [`Walker`] is the traversal source of the pipeline: it lazily yields a
//! [`FileEntry`] (path and size) for every regular file under a root.
//! Directories, symlinks and special files are skipped. Hidden files are
//! included, and so are empty files.
//!
//! Entry-level failures never stop the walk. [`Walker::walk`] yields them as
//! [`ScanError`] values; [`Walker::files`] logs and discards them.
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."));
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::{FileEntry, ScanError};

/// Directory walker yielding every regular file under a root.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
}

impl Walker {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Walk the directory tree, yielding file entries.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration. Sibling entries are visited in file-name order.
    ///
    /// When the root is `.`, yielded paths are relative to it (`a/x.txt`
    /// rather than `./a/x.txt`).
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .follow_links(false)
            .skip_hidden(false)
            .process_read_dir(|_depth, _path, _read_dir_state, children| {
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => a.file_name().cmp(b.file_name()),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => std::cmp::Ordering::Equal,
                });
            });

        walk_dir
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    // Only regular files; symlinks are not followed
                    if !entry.file_type().is_file() {
                        return None;
                    }

                    let path = self.display_path(entry.path());
                    match entry.metadata() {
                        Ok(metadata) => Some(Ok(FileEntry::new(path, metadata.len()))),
                        Err(e) => {
                            log::warn!("Cannot stat {}: {}", path.display(), e);
                            Some(Err(ScanError::Io {
                                path,
                                source: std::io::Error::other(e.to_string()),
                            }))
                        }
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), std::borrow::ToOwned::to_owned);
                    log::warn!("Walker error for {}: {}", path.display(), e);
                    let error = match e.io_error() {
                        Some(io) => std::io::Error::new(io.kind(), e.to_string()),
                        None => std::io::Error::other(e.to_string()),
                    };
                    Some(Err(ScanError::from_io(&path, error)))
                }
            })
    }

    /// Walk the tree, logging and skipping entries that could not be read.
    pub fn files(&self) -> impl Iterator<Item = FileEntry> + '_ {
        self.walk().filter_map(|result| match result {
            Ok(file) => Some(file),
            Err(e) => {
                log::debug!("Skipping entry: {}", e);
                None
            }
        })
    }

    /// Strip a leading `./` when walking the current directory.
    fn display_path(&self, path: PathBuf) -> PathBuf {
        if self.root == Path::new(".") {
            if let Ok(relative) = path.strip_prefix(".") {
                return relative.to_path_buf();
            }
        }
        path
    }
}
