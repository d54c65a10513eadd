//! Output formatters for sweep results.
//!
//! Per-file lines are written by the deletion stage while the run is in
//! progress; this module renders the final report once both tallies are in.
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::actions::FsRemover;
//! use dupesweep::duplicates::DuplicateFinder;
//! use dupesweep::output::write_summary;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let summary = finder.scan_directory(Path::new("."), FsRemover, std::io::stdout()).unwrap();
//! write_summary(&mut std::io::stdout(), &summary).unwrap();
//! ```

pub mod summary;

// Re-export main types
pub use summary::write_summary;
