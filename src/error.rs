//! Exit codes for the dupesweep binary.
//!
//! Only a failure to run the pipeline at all is reported through the exit
//! status. Unreadable files and failed removals are logged and the run still
//! exits with [`ExitCode::Success`], so a clean run and one that dropped
//! files look the same to a calling script.

/// Exit codes for the dupesweep application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The sweep ran to completion.
    Success = 0,
    /// The pipeline could not be started or a stage crashed.
    GeneralError = 1,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
        }
    }
}
