//! Top-level unified error type for the forecasting engine.

use thiserror::Error;

use super::sub_errors::{ConfigError, SourceError};

// ============================================================================
// TOP-LEVEL UNIFIED ERROR TYPE
// ============================================================================

/// Top-level error type for cutoff-forecast-core.
///
/// Sub-errors convert into this type via `From`, so `?` works across module
/// boundaries.
///
/// # Classification
///
/// - Contract violations (`InvalidWindow`, `OutOfOrder`, `Config`) mean the
///   caller handed the engine input it must never hand it. Surface them.
/// - Source errors are usually transient or data-specific and only affect the
///   single (event, tier) computation that hit them.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Event window with `end_ts <= start_ts`.
    #[error("Invalid event window: end_ts {end_ts} must be greater than start_ts {start_ts}")]
    InvalidWindow {
        /// Window start (ms since epoch)
        start_ts: i64,
        /// Window end (ms since epoch)
        end_ts: i64,
    },

    /// Observation appended with a timestamp older than the current tail.
    #[error("Out-of-order observation: timestamp {ts} is older than last recorded {last_ts}")]
    OutOfOrder {
        /// Timestamp of the current tail
        last_ts: i64,
        /// Timestamp of the rejected observation
        ts: i64,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data source error.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Input value outside its allowed domain (e.g. non-finite rate).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ForecastError {
    /// True when the error is a caller contract violation rather than a
    /// data or environment problem.
    ///
    /// ```rust
    /// use cutoff_forecast_core::error::{ForecastError, SourceError};
    ///
    /// let err = ForecastError::InvalidWindow { start_ts: 10, end_ts: 5 };
    /// assert!(err.is_contract_violation());
    ///
    /// let err = ForecastError::Source(SourceError::EventNotFound(42));
    /// assert!(!err.is_contract_violation());
    /// ```
    #[inline]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidWindow { .. } | Self::OutOfOrder { .. } | Self::Config(_)
        )
    }

    /// True when retrying the same request later may succeed.
    ///
    /// Only I/O failures on the data source qualify; a malformed payload
    /// stays malformed.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Source(SourceError::Io { .. }))
    }
}

/// Result type alias for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;
