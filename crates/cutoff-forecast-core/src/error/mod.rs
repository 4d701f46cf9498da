//! Error types for cutoff-forecast-core.
//!
//! - [`ForecastError`]: top-level error returned by every fallible operation
//! - Sub-error types: [`ConfigError`], [`SourceError`]
//!
//! Only contract violations are errors. "Not enough eligible observations"
//! and "degenerate regression prefix" are ordinary outcomes and are reported
//! through [`crate::forecast::ForecastSummary::is_available`] and
//! [`crate::forecast::Forecast::degenerate_prefixes`] instead.
//!
//! # Examples
//!
//! ```rust
//! use cutoff_forecast_core::error::ForecastError;
//! use cutoff_forecast_core::types::EventWindow;
//!
//! let result = EventWindow::new(1_000, 1_000, "story", 100);
//! assert!(matches!(
//!     result,
//!     Err(ForecastError::InvalidWindow { start_ts: 1_000, end_ts: 1_000 })
//! ));
//! ```

mod sub_errors;
mod unified;

#[cfg(test)]
mod tests;

pub use sub_errors::{ConfigError, SourceError};
pub use unified::{ForecastError, Result};
