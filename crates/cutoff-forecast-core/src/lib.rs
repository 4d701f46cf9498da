//! Cutoff Forecast Core Library
//!
//! Forecasts the final score cutoff of a ranking tier from the cutoffs
//! observed so far during a time-bounded event.
//!
//! # Architecture
//!
//! This crate defines:
//! - Observation types and the append-only `ObservationStore`
//! - Window selection (`selector`) and normalized event time
//! - Running and batch linear regression (`regression`)
//! - Rate-calibrated forecasting and summaries (`forecast`)
//! - The `DataSource` trait with JSON directory and in-memory sources
//! - Error types and result aliases
//! - Configuration structures
//!
//! # Example
//!
//! ```
//! use cutoff_forecast_core::{EventWindow, Observation, ObservationStore, ForecastEngine};
//!
//! let window = EventWindow::new(0, 864_000_000, "story", 100)?;
//! let mut store = ObservationStore::new();
//! store.push(Observation::new(3_600_000, 10))?;
//!
//! let forecast = ForecastEngine::default().run(&store, &window, None)?;
//! assert!(!forecast.is_available());
//! # Ok::<(), cutoff_forecast_core::ForecastError>(())
//! ```

pub mod config;
pub mod error;
pub mod forecast;
pub mod regression;
pub mod selector;
pub mod source;
pub mod types;

// Re-exports for convenience
pub use config::ForecastConfig;
pub use error::{ConfigError, ForecastError, Result, SourceError};
pub use forecast::{
    format_elapsed, Forecast, ForecastEngine, ForecastPoint, ForecastReport, ForecastRequest,
    ForecastSummary,
};
pub use source::{DataSource, EventInfo, InMemorySource, JsonDirectorySource};
pub use types::{EventWindow, Observation, ObservationStore};
