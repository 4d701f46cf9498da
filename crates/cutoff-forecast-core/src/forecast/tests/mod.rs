//! Forecast module tests, split by component.

mod forecaster_tests;

use crate::types::{EventWindow, Observation, ObservationStore};

pub(super) const HOUR_MS: i64 = 60 * 60 * 1000;
pub(super) const TEN_DAYS_MS: i64 = 240 * HOUR_MS;

pub(super) fn ten_day_window() -> EventWindow {
    EventWindow::new(0, TEN_DAYS_MS, "story", 100).expect("valid window")
}

/// Observation at `percent` of the ten-day window.
pub(super) fn at_percent(percent: f64, score: u64) -> Observation {
    Observation::new((percent * TEN_DAYS_MS as f64).round() as i64, score)
}

/// Five points on the line score = 2000 × percent.
pub(super) fn perfect_line_store() -> ObservationStore {
    ObservationStore::from_unordered(vec![
        at_percent(0.50, 1000),
        at_percent(0.55, 1100),
        at_percent(0.60, 1200),
        at_percent(0.65, 1300),
        at_percent(0.70, 1400),
    ])
}
