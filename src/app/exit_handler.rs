//! Exit code logic for the downloader process.
//!
//! Single responsibility: map the run status to the process exit outcome.

use std::process::ExitCode;

use avatar_downloader::RunStatus;

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Every model is present.
    Success,
    /// The input held no usable avatar ID.
    NoInput,
    /// At least one model could not be fetched.
    PartialFailure,
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::NoInput => 1,
            Self::PartialFailure => 2,
        }
    }
}

impl From<ProcessExit> for ExitCode {
    fn from(value: ProcessExit) -> Self {
        ExitCode::from(value.code())
    }
}

/// Determines the process exit outcome from the aggregated run status.
pub(crate) fn determine_exit_outcome(status: RunStatus) -> ProcessExit {
    match status {
        RunStatus::Clean => ProcessExit::Success,
        RunStatus::PartialFailure => ProcessExit::PartialFailure,
    }
}
