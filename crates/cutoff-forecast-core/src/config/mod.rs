//! Forecast engine configuration.
//!
//! # Loading Configuration
//!
//! ```rust,ignore
//! use cutoff_forecast_core::ForecastConfig;
//!
//! let config = ForecastConfig::from_file("forecast.toml")?
//!     .with_env_overrides();
//! config.validate()?;
//! ```
//!
//! # TOML Structure
//!
//! ```toml
//! min_gap_from_start_ms = 43200000
//! min_gap_before_end_ms = 86400000
//! min_samples = 5
//! server = 3
//! allowed_tiers = [100, 1000, 2000]
//! ```
//!
//! Missing keys take their defaults. Invalid values are rejected by
//! [`ForecastConfig::validate`], never silently corrected.

pub mod constants;


use std::env;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ForecastError, Result};
use crate::types::EventWindow;

/// Root configuration for the forecasting engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Minimum distance from event start for an observation to be eligible.
    pub min_gap_from_start_ms: u64,

    /// Minimum distance before event end for an observation to be eligible.
    pub min_gap_before_end_ms: u64,

    /// Eligible prefix length at which forecasting starts.
    /// Range: `>= 2`
    pub min_samples: usize,

    /// Server index into per-server event metadata and calibration rates.
    /// Range: `[0, 5)`
    pub server: usize,

    /// Tiers that requests may target.
    pub allowed_tiers: Vec<u32>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_gap_from_start_ms: constants::window::MIN_GAP_FROM_START_MS,
            min_gap_before_end_ms: constants::window::MIN_GAP_BEFORE_END_MS,
            min_samples: constants::regression::MIN_SAMPLES,
            server: constants::source::DEFAULT_SERVER,
            allowed_tiers: constants::source::DEFAULT_TIERS.to_vec(),
        }
    }
}

impl ForecastConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - `ConfigError::Parse` if TOML parsing fails
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&contents).map_err(|e| {
            ForecastError::from(ConfigError::Parse(format!("'{}': {}", path.display(), e)))
        })
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| ForecastError::from(ConfigError::Parse(e.to_string())))
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ForecastError::from(ConfigError::Parse(e.to_string())))
    }

    /// Validate all configuration values, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.min_samples < constants::regression::MIN_SAMPLES_FLOOR {
            return Err(ConfigError::Invalid {
                field: "min_samples",
                message: format!(
                    "must be >= {}, got {}",
                    constants::regression::MIN_SAMPLES_FLOOR,
                    self.min_samples
                ),
            }
            .into());
        }
        if self.server >= constants::source::SERVER_SLOTS {
            return Err(ConfigError::Invalid {
                field: "server",
                message: format!(
                    "must be in [0, {}), got {}",
                    constants::source::SERVER_SLOTS,
                    self.server
                ),
            }
            .into());
        }
        if self.allowed_tiers.is_empty() {
            return Err(ConfigError::Invalid {
                field: "allowed_tiers",
                message: "must not be empty".to_string(),
            }
            .into());
        }
        if self.allowed_tiers.contains(&0) {
            return Err(ConfigError::Invalid {
                field: "allowed_tiers",
                message: "tier 0 is not a placement rank".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Apply environment variable overrides. Prefix: `CUTOFF_`
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `CUTOFF_MIN_GAP_FROM_START_MS` | `min_gap_from_start_ms` |
    /// | `CUTOFF_MIN_GAP_BEFORE_END_MS` | `min_gap_before_end_ms` |
    /// | `CUTOFF_MIN_SAMPLES` | `min_samples` |
    /// | `CUTOFF_SERVER` | `server` |
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_parse("CUTOFF_MIN_GAP_FROM_START_MS") {
            self.min_gap_from_start_ms = v;
        }
        if let Some(v) = env_parse("CUTOFF_MIN_GAP_BEFORE_END_MS") {
            self.min_gap_before_end_ms = v;
        }
        if let Some(v) = env_parse("CUTOFF_MIN_SAMPLES") {
            self.min_samples = v;
        }
        if let Some(v) = env_parse("CUTOFF_SERVER") {
            self.server = v;
        }
        self
    }

    /// Whether `tier` is one of the configured tiers.
    pub fn is_tier_allowed(&self, tier: u32) -> bool {
        self.allowed_tiers.contains(&tier)
    }

    /// Build an event window carrying this configuration's edge margins.
    pub fn window(
        &self,
        start_ts: i64,
        end_ts: i64,
        event_type: impl Into<String>,
        tier: u32,
    ) -> Result<EventWindow> {
        Ok(EventWindow::new(start_ts, end_ts, event_type, tier)?.with_margins(
            Duration::from_millis(self.min_gap_from_start_ms),
            Duration::from_millis(self.min_gap_before_end_ms),
        ))
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable config override");
            None
        }
    }
}
