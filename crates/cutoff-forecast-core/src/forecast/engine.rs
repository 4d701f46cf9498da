//! Forecast engine: the entry point tying configuration, data source, and
//! forecaster together.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::source::{DataSource, EventInfo};
use crate::types::{EventWindow, ObservationStore};

use super::forecaster::{CalibratedForecaster, Forecast, IncrementalForecaster};
use super::summary::ForecastSummary;

/// One (event, tier) pair to forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub event_id: u32,
    pub tier: u32,
}

impl ForecastRequest {
    pub fn new(event_id: u32, tier: u32) -> Self {
        Self { event_id, tier }
    }
}

/// Everything a consumer needs to render one forecast: the raw observations,
/// the forecast curve, and its summary.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub request: ForecastRequest,
    pub event_name: String,
    pub window: EventWindow,
    /// Calibration rate as supplied by the source; `None` when unavailable
    pub supplied_rate: Option<f64>,
    pub observations: ObservationStore,
    pub forecast: Forecast,
    pub summary: ForecastSummary,
}

/// Stateless forecasting engine. Every run is a pure function of its inputs,
/// so one engine can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    /// # Errors
    /// `ForecastError::Config` if `config` fails validation.
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast over a complete observation store.
    ///
    /// Eligibility uses the margins carried by `window`, not the configured
    /// `min_gap_*_ms`. Build the window with [`ForecastConfig::window`] (or
    /// [`Self::window_for`]) to apply the configured margins.
    ///
    /// A `None` rate means the source has no calibration for this
    /// combination; the forecast falls back to the raw projection at event
    /// end (rate 0).
    ///
    /// # Errors
    /// `ForecastError::Validation` if `rate` is not finite.
    pub fn run(
        &self,
        store: &ObservationStore,
        window: &EventWindow,
        rate: Option<f64>,
    ) -> Result<Forecast> {
        let mut forecaster = self.incremental(window, rate)?;
        for observation in store {
            forecaster.push(*observation)?;
        }
        let forecast = forecaster.finish();

        tracing::debug!(
            tier = window.tier(),
            event_type = window.event_type(),
            observations = store.len(),
            eligible = forecast.eligible.len(),
            points = forecast.points.len(),
            degenerate = forecast.degenerate_prefixes,
            final_prediction = ?forecast.final_prediction(),
            "Forecast computed"
        );
        Ok(forecast)
    }

    /// Start an incremental forecaster for live ingestion.
    pub fn incremental(
        &self,
        window: &EventWindow,
        rate: Option<f64>,
    ) -> Result<IncrementalForecaster> {
        let rate = rate.unwrap_or_else(|| {
            tracing::warn!(
                tier = window.tier(),
                event_type = window.event_type(),
                "Calibration rate unavailable; projecting raw trend to event end"
            );
            0.0
        });
        Ok(IncrementalForecaster::new(
            window.clone(),
            CalibratedForecaster::new(rate)?,
            self.config.min_samples,
        ))
    }

    /// Event window for `event` on the configured server.
    pub fn window_for(&self, event: &EventInfo, tier: u32) -> Result<EventWindow> {
        let (start_ts, end_ts) = event.schedule(self.config.server)?;
        self.config
            .window(start_ts, end_ts, event.event_type.as_str(), tier)
    }

    /// Load inputs for `request` from `source` and forecast.
    ///
    /// # Errors
    /// - `ForecastError::Validation` if the tier is not configured
    /// - any error from `source`
    /// - `ForecastError::InvalidWindow` if the event's schedule is inverted
    pub fn run_request(
        &self,
        source: &dyn DataSource,
        request: ForecastRequest,
    ) -> Result<ForecastReport> {
        if !self.config.is_tier_allowed(request.tier) {
            return Err(ForecastError::Validation(format!(
                "tier {} is not tracked",
                request.tier
            )));
        }

        let event = source.event(request.event_id)?;
        let window = self.window_for(&event, request.tier)?;
        let observations = source.observations(request.event_id, request.tier)?;
        let supplied_rate = source.rate(self.config.server, request.tier, &event.event_type)?;

        let forecast = self.run(&observations, &window, supplied_rate)?;
        let summary = forecast.summary(&observations);

        tracing::info!(
            event_id = request.event_id,
            tier = request.tier,
            available = summary.is_available,
            final_prediction = ?summary.final_prediction(),
            "Forecast request complete"
        );

        Ok(ForecastReport {
            request,
            event_name: event.display_name(self.config.server),
            window,
            supplied_rate,
            observations,
            forecast,
            summary,
        })
    }

    /// Run independent requests in parallel.
    ///
    /// Results come back in request order; one failing request does not
    /// affect the others.
    pub fn run_many(
        &self,
        source: &dyn DataSource,
        requests: &[ForecastRequest],
    ) -> Vec<(ForecastRequest, Result<ForecastReport>)> {
        requests
            .par_iter()
            .map(|&request| (request, self.run_request(source, request)))
            .collect()
    }
}
