//! Rate-calibrated forecaster and its incremental driver.

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::regression::{RegressionFit, RegressionOutcome, RunningRegression};
use crate::selector::{self, NormalizedSample};
use crate::types::{EventWindow, Observation, ObservationStore};

use super::summary::ForecastSummary;

/// One point of the forecast curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Timestamp of the observation whose prefix produced this point
    pub timestamp: i64,
    /// Forecast final cutoff
    pub predicted_score: u64,
}

/// Clamp a raw prediction to non-negative and round half away from zero.
///
/// NaN maps to 0; values beyond `u64::MAX` saturate.
#[inline]
pub fn round_score(raw: f64) -> u64 {
    // f64::max returns the non-NaN operand.
    raw.max(0.0).round() as u64
}

/// Evaluates regression lines at `percent = 1 + rate`.
///
/// `rate` is the externally supplied late-event acceleration for the
/// (server, tier, event type) combination. A rate of 0 projects the raw trend
/// to event end.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibratedForecaster {
    rate: f64,
}

impl CalibratedForecaster {
    /// # Errors
    /// `ForecastError::Validation` if `rate` is not finite.
    pub fn new(rate: f64) -> Result<Self> {
        if !rate.is_finite() {
            return Err(ForecastError::Validation(format!(
                "calibration rate must be finite, got {}",
                rate
            )));
        }
        Ok(Self { rate })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Unrounded calibrated prediction.
    #[inline]
    pub fn predict_raw(&self, fit: &RegressionFit) -> f64 {
        fit.evaluate(1.0 + self.rate)
    }

    /// Calibrated prediction as a non-negative integer score.
    pub fn predict(&self, fit: &RegressionFit) -> u64 {
        round_score(self.predict_raw(fit))
    }
}

/// Full result of one forecasting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Eligible observations, in timestamp order
    pub eligible: Vec<Observation>,
    /// Forecast curve, one point per successful prefix
    pub points: Vec<ForecastPoint>,
    /// Regression over the longest successful prefix
    pub last_fit: Option<RegressionFit>,
    /// Prefixes at or above the sample threshold that had zero time variance
    pub degenerate_prefixes: usize,
    /// Calibration rate the points were computed with
    pub rate: f64,
}

impl Forecast {
    /// Final predicted value: the last point of the curve.
    pub fn final_prediction(&self) -> Option<u64> {
        self.points.last().map(|p| p.predicted_score)
    }

    pub fn is_available(&self) -> bool {
        !self.points.is_empty()
    }

    /// Read-only projection for presentation layers.
    pub fn summary(&self, store: &ObservationStore) -> ForecastSummary {
        ForecastSummary::new(self, store)
    }
}

/// Feeds observations one at a time through selection, regression, and
/// calibration.
///
/// Ineligible observations are ignored. Each eligible observation grows the
/// prefix by one; once the prefix reaches `min_samples`, a point is emitted
/// unless the regression is degenerate.
#[derive(Debug, Clone)]
pub struct IncrementalForecaster {
    window: EventWindow,
    forecaster: CalibratedForecaster,
    min_samples: usize,
    regression: RunningRegression,
    eligible: Vec<Observation>,
    points: Vec<ForecastPoint>,
    last_fit: Option<RegressionFit>,
    degenerate_prefixes: usize,
    last: Option<Observation>,
}

impl IncrementalForecaster {
    pub fn new(window: EventWindow, forecaster: CalibratedForecaster, min_samples: usize) -> Self {
        Self {
            window,
            forecaster,
            min_samples: min_samples.max(1),
            regression: RunningRegression::new(),
            eligible: Vec::new(),
            points: Vec::new(),
            last_fit: None,
            degenerate_prefixes: 0,
            last: None,
        }
    }

    /// Process the next observation.
    ///
    /// Returns the newly emitted point, if any. An exact repeat of the
    /// previous observation is ignored, matching [`ObservationStore::push`].
    ///
    /// # Errors
    /// `ForecastError::OutOfOrder` if `observation` is older than the
    /// previous one. State is left untouched in that case.
    pub fn push(&mut self, observation: Observation) -> Result<Option<ForecastPoint>> {
        if let Some(last) = self.last {
            if observation.timestamp < last.timestamp {
                return Err(ForecastError::OutOfOrder {
                    last_ts: last.timestamp,
                    ts: observation.timestamp,
                });
            }
            if observation == last {
                return Ok(None);
            }
        }
        self.last = Some(observation);

        if !selector::is_eligible(&self.window, observation.timestamp) {
            return Ok(None);
        }

        self.eligible.push(observation);
        self.regression
            .push(NormalizedSample::from_observation(&self.window, &observation));

        if self.eligible.len() < self.min_samples {
            return Ok(None);
        }

        match self.regression.fit() {
            RegressionOutcome::Fit(fit) => {
                let point = ForecastPoint {
                    timestamp: observation.timestamp,
                    predicted_score: self.forecaster.predict(&fit),
                };
                tracing::trace!(
                    timestamp = point.timestamp,
                    predicted = point.predicted_score,
                    slope = fit.slope,
                    intercept = fit.intercept,
                    "Forecast point emitted"
                );
                self.last_fit = Some(fit);
                self.points.push(point);
                Ok(Some(point))
            }
            RegressionOutcome::Degenerate => {
                tracing::trace!(
                    prefix = self.eligible.len(),
                    "Degenerate regression prefix skipped"
                );
                self.degenerate_prefixes += 1;
                Ok(None)
            }
        }
    }

    pub fn window(&self) -> &EventWindow {
        &self.window
    }

    pub fn eligible(&self) -> &[Observation] {
        &self.eligible
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn last_fit(&self) -> Option<&RegressionFit> {
        self.last_fit.as_ref()
    }

    /// Snapshot of the current state as a [`Forecast`].
    pub fn snapshot(&self) -> Forecast {
        self.clone().finish()
    }

    /// Consume the driver and return the accumulated forecast.
    pub fn finish(self) -> Forecast {
        Forecast {
            eligible: self.eligible,
            points: self.points,
            last_fit: self.last_fit,
            degenerate_prefixes: self.degenerate_prefixes,
            rate: self.forecaster.rate(),
        }
    }
}
