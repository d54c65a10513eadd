//! File actions module.
//!
//! This module provides the deletion stage of the pipeline:
//! - Counting every delete decision
//! - Permanent removal in live mode
//! - Report-only handling in dry-run mode
//!
//! ```no_run
//! use dupesweep::actions::delete::permanent_delete;
//! use std::path::Path;
//!
//! let result = permanent_delete(Path::new("/path/to/duplicate.txt"));
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{
    permanent_delete, DeleteError, DeletionOutcome, DeletionStage, FsRemover, Remover,
};
