//! Event window: the time span an event runs for, plus regression margins.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::constants;
use crate::error::{ForecastError, Result};

/// Valid span of one event for one tier.
///
/// Created once per query and never mutated afterwards. `end_ts > start_ts`
/// holds for every constructed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWindow {
    start_ts: i64,
    end_ts: i64,
    event_type: String,
    tier: u32,
    min_gap_from_start: Duration,
    min_gap_before_end: Duration,
}

impl EventWindow {
    /// Create a window with the default 12 h / 24 h edge margins.
    ///
    /// # Errors
    /// `ForecastError::InvalidWindow` if `end_ts <= start_ts`.
    pub fn new(start_ts: i64, end_ts: i64, event_type: impl Into<String>, tier: u32) -> Result<Self> {
        if end_ts <= start_ts {
            return Err(ForecastError::InvalidWindow { start_ts, end_ts });
        }
        Ok(Self {
            start_ts,
            end_ts,
            event_type: event_type.into(),
            tier,
            min_gap_from_start: Duration::from_millis(constants::window::MIN_GAP_FROM_START_MS),
            min_gap_before_end: Duration::from_millis(constants::window::MIN_GAP_BEFORE_END_MS),
        })
    }

    /// Replace the edge margins.
    #[must_use]
    pub fn with_margins(mut self, from_start: Duration, before_end: Duration) -> Self {
        self.min_gap_from_start = from_start;
        self.min_gap_before_end = before_end;
        self
    }

    pub fn start_ts(&self) -> i64 {
        self.start_ts
    }

    pub fn end_ts(&self) -> i64 {
        self.end_ts
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn tier(&self) -> u32 {
        self.tier
    }

    pub fn min_gap_from_start(&self) -> Duration {
        self.min_gap_from_start
    }

    pub fn min_gap_before_end(&self) -> Duration {
        self.min_gap_before_end
    }

    /// Start margin in milliseconds, saturating at `i64::MAX`.
    pub fn min_gap_from_start_ms(&self) -> i64 {
        duration_ms(self.min_gap_from_start)
    }

    /// End margin in milliseconds, saturating at `i64::MAX`.
    pub fn min_gap_before_end_ms(&self) -> i64 {
        duration_ms(self.min_gap_before_end)
    }

    /// Event length in milliseconds. Always positive; saturates at `i64::MAX`.
    pub fn span_ms(&self) -> i64 {
        self.end_ts.saturating_sub(self.start_ts)
    }

    /// Elapsed fraction of the window at `timestamp`.
    ///
    /// Not clamped: timestamps outside the window map outside `[0, 1]`.
    pub fn percent(&self, timestamp: i64) -> f64 {
        let elapsed = i128::from(timestamp) - i128::from(self.start_ts);
        let span = i128::from(self.end_ts) - i128::from(self.start_ts);
        elapsed as f64 / span as f64
    }
}

fn duration_ms(d: Duration) -> i64 {
    i64::try_from(d.as_millis()).unwrap_or(i64::MAX)
}
