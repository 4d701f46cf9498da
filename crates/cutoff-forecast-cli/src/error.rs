//! CLI exit code handling.
//!
//! Exit codes:
//! - 0: Success (forecast or "insufficient data" on stdout)
//! - 1: Recoverable error, e.g. a payload is missing or unreadable
//! - 2: Invalid input that retrying cannot fix

use std::process::ExitCode;

use cutoff_forecast_core::ForecastError;

/// Exit codes for CLI commands, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum CliExitCode {
    /// Success
    Success = 0,
    /// Recoverable error - data may appear on a later run
    Warning = 1,
    /// Blocking failure - configuration or request is wrong
    Blocking = 2,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

impl From<&ForecastError> for CliExitCode {
    fn from(err: &ForecastError) -> Self {
        match err {
            // Caller supplied something that can never work - Exit 2
            ForecastError::InvalidWindow { .. } => CliExitCode::Blocking,
            ForecastError::OutOfOrder { .. } => CliExitCode::Blocking,
            ForecastError::Config(_) => CliExitCode::Blocking,
            ForecastError::Validation(_) => CliExitCode::Blocking,

            // Payload problems - Exit 1
            ForecastError::Source(_) => CliExitCode::Warning,
        }
    }
}

/// Most severe code of a set of outcomes; `Success` when empty.
pub fn worst<I>(codes: I) -> CliExitCode
where
    I: IntoIterator<Item = CliExitCode>,
{
    codes.into_iter().max().unwrap_or(CliExitCode::Success)
}
