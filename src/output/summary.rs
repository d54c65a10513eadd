//! Plain-text run summary.

use std::io::{self, Write};

use bytesize::ByteSize;

use crate::duplicates::RunSummary;

/// Write the four summary lines for a finished run.
///
/// Sizes are raw byte counts. Dropped files and failed removals are not part
/// of the report; they are logged as warnings so they are not silently lost.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    writeln!(out, "Total files scanned: {}", summary.scanned.count)?;
    writeln!(out, "Total filesize: {}", summary.scanned.total_size)?;
    writeln!(out, "Deleted files: {}", summary.deleted.count)?;
    writeln!(out, "Deleted size: {}", summary.deleted.total_size)?;
    out.flush()?;

    log::info!(
        "Reclaimed {} across {} duplicate files",
        ByteSize::b(summary.deleted.total_size),
        summary.deleted.count
    );
    if summary.hash_failures > 0 {
        log::warn!(
            "{} files could not be read and were left out of the totals",
            summary.hash_failures
        );
    }
    if summary.delete_failures > 0 {
        log::warn!(
            "{} files could not be removed but are counted as deleted",
            summary.delete_failures
        );
    }
    Ok(())
}
