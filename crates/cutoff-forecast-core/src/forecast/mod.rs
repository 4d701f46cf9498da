//! Calibrated forecasting: regression fits → forecast points → summary.
//!
//! # Architecture
//!
//! ```text
//! ObservationStore ──► selector ──► RunningRegression ──► CalibratedForecaster
//!                                                             │
//!                                      Forecast (points) ◄────┘
//!                                            │
//!                                     ForecastSummary
//! ```
//!
//! For every eligible prefix of at least `min_samples` observations whose
//! regression is well-defined, one [`ForecastPoint`] is emitted:
//!
//! ```text
//! predicted = round(max(0, intercept + slope × (1 + rate)))
//! ```
//!
//! The forecast sequence is append-only: pushing more observations never
//! changes points already emitted.
//!
//! # Example
//!
//! ```rust
//! use cutoff_forecast_core::forecast::ForecastEngine;
//! use cutoff_forecast_core::types::{EventWindow, Observation, ObservationStore};
//!
//! let window = EventWindow::new(0, 864_000_000, "story", 100)?;
//! let store = ObservationStore::from_unordered(
//!     (0..5)
//!         .map(|i| Observation::new(432_000_000 + i * 43_200_000, 1_000 + i as u64 * 100))
//!         .collect(),
//! );
//!
//! let forecast = ForecastEngine::default().run(&store, &window, Some(0.0))?;
//! let summary = forecast.summary(&store);
//! assert!(summary.is_available);
//! assert_eq!(summary.final_prediction(), Some(2_000));
//! # Ok::<(), cutoff_forecast_core::ForecastError>(())
//! ```

mod engine;
mod forecaster;
mod summary;

#[cfg(test)]
mod tests;

pub use engine::{ForecastEngine, ForecastReport, ForecastRequest};
pub use forecaster::{
    round_score, CalibratedForecaster, Forecast, ForecastPoint, IncrementalForecaster,
};
pub use summary::{format_elapsed, ForecastSummary};
