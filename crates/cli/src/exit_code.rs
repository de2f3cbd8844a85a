//! Process exit codes
//!
//! Every failure, whether a usage error, a bad path or pattern, or a backend
//! error, exits with 1. Finding no matches is a success.

/// Exit status of an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Listing completed, with or without matches
    Success = 0,
    /// Usage, path, pattern or backend error
    Failure = 1,
}

impl ExitCode {
    /// Numeric process exit code
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}
