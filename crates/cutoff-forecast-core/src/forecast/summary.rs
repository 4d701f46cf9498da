//! Forecast summary: what a presentation layer needs to decide between a
//! prediction line and an "insufficient data" message.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Observation, ObservationStore};

use super::forecaster::{Forecast, ForecastPoint};

/// Read-only projection of a [`Forecast`] and its observation store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// True iff the forecast curve is non-empty
    pub is_available: bool,
    /// Last point of the forecast curve
    pub latest_forecast: Option<ForecastPoint>,
    /// Most recent raw observation, eligible or not
    pub latest_observation: Option<Observation>,
    /// Number of eligible observations
    pub sample_count: usize,
}

impl ForecastSummary {
    pub fn new(forecast: &Forecast, store: &ObservationStore) -> Self {
        Self {
            is_available: forecast.is_available(),
            latest_forecast: forecast.points.last().copied(),
            latest_observation: store.latest().copied(),
            sample_count: forecast.eligible.len(),
        }
    }

    /// The final predicted cutoff, if a forecast is available.
    pub fn final_prediction(&self) -> Option<u64> {
        self.latest_forecast.map(|p| p.predicted_score)
    }

    /// Age of the latest observation at `now_ms`.
    ///
    /// Observations stamped in the future report zero staleness.
    pub fn staleness(&self, now_ms: i64) -> Option<Duration> {
        let latest = self.latest_observation?;
        let age_ms = now_ms.saturating_sub(latest.timestamp).max(0);
        Some(Duration::from_millis(age_ms as u64))
    }

    /// Age of the latest observation at `now`.
    pub fn staleness_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.staleness(now.timestamp_millis())
    }
}

/// Compact elapsed-time label, e.g. `"1d 3h 12m"`.
///
/// Days, hours, and minutes are shown from the largest non-zero unit down.
/// Seconds appear only when the duration is under a minute.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let days = total_secs / 86_400;
    let hours = (total_secs / 3_600) % 24;
    let minutes = (total_secs / 60) % 60;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if total_secs >= 3_600 {
        parts.push(format!("{}h", hours));
    }
    if total_secs >= 60 {
        parts.push(format!("{}m", minutes));
    }
    if parts.is_empty() {
        parts.push(format!("{}s", total_secs));
    }
    parts.join(" ")
}
