//! Sub-error types for cutoff-forecast-core.

use thiserror::Error;

// ============================================================================
// CONFIG ERROR
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read config file '{path}': {message}")]
    Io {
        /// Path of the config file
        path: String,
        /// Underlying I/O error message
        message: String,
    },

    /// TOML parse or serialization failure.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A field holds a value outside its allowed range.
    #[error("Invalid value for '{field}': {message}")]
    Invalid {
        /// Field name as it appears in the TOML file
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

// ============================================================================
// SOURCE ERROR
// ============================================================================

/// Errors raised while loading observations, event metadata, or rates.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Payload could not be read.
    #[error("Failed to read '{path}': {message}")]
    Io {
        /// Path (or locator) of the payload
        path: String,
        /// Underlying I/O error message
        message: String,
    },

    /// Payload was read but is not in the expected shape.
    #[error("Malformed {what} payload: {message}")]
    Parse {
        /// Which payload kind failed ("tracker", "rates", "events")
        what: &'static str,
        /// Parser error message
        message: String,
    },

    /// Event id absent from the catalog.
    #[error("Event {0} not found in catalog")]
    EventNotFound(u32),

    /// Event has no usable start/end time for the requested server and no
    /// schedule can be derived.
    #[error("Event {event_id} has no schedule for server {server}")]
    MissingSchedule {
        /// Event id
        event_id: u32,
        /// Server index that was requested
        server: usize,
    },
}
