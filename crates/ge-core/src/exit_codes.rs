//! Exit codes for the ge-core CLI.
//!
//! Exit codes communicate outcome without output parsing. A legitimate
//! `NaN` evaluation result is a success (the sentinel goes to stdout and the
//! process exits 0); only true errors exit non-zero.
//!
//! Ranges:
//! - 0: success (including undefined-result outcomes)
//! - 10-19: user/domain errors (bad arguments, out-of-domain parameters)
//! - 20-29: internal errors
//! - 30-39: configuration errors

use ge_common::{Error, ErrorCategory};

/// Exit codes for ge-core operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success, including a legitimate NaN result.
    Ok = 0,

    /// Invalid arguments or out-of-domain parameters.
    ArgsError = 10,

    /// Internal error (bug or unexpected evaluation failure).
    InternalError = 20,

    /// I/O failure.
    IoError = 21,

    /// Sweep configuration rejected at load time.
    ConfigError = 30,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map an engine error to its exit code.
    pub fn from_error(err: &Error) -> Self {
        match err.category() {
            ErrorCategory::Domain => ExitCode::ArgsError,
            ErrorCategory::Numeric => ExitCode::InternalError,
            ErrorCategory::Config => ExitCode::ConfigError,
            ErrorCategory::Io => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}
