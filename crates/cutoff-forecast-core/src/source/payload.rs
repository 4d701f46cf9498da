//! Tracker and rate payloads.

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result, SourceError};
use crate::types::{Observation, ObservationStore};

/// One cutoff entry of a tracker payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerCutoff {
    /// Milliseconds since the Unix epoch
    pub time: i64,
    /// Event points at that time
    pub ep: u64,
}

/// Tracker payload for one (event, tier) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerPayload {
    #[serde(default)]
    pub cutoffs: Vec<TrackerCutoff>,
}

impl TrackerPayload {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            ForecastError::from(SourceError::Parse {
                what: "tracker",
                message: e.to_string(),
            })
        })
    }

    /// Convert into a sorted, deduplicated observation store.
    pub fn into_store(self) -> ObservationStore {
        ObservationStore::from_unordered(
            self.cutoffs
                .into_iter()
                .map(|c| Observation::new(c.time, c.ep))
                .collect(),
        )
    }
}

/// One calibration rate entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub server: usize,
    pub tier: u32,
    #[serde(rename = "type")]
    pub event_type: String,
    pub rate: f64,
}

/// All published calibration rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    entries: Vec<RateEntry>,
}

impl RateTable {
    pub fn new(entries: Vec<RateEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            ForecastError::from(SourceError::Parse {
                what: "rates",
                message: e.to_string(),
            })
        })
    }

    /// First rate matching all three keys.
    ///
    /// Non-finite rates are treated as missing.
    pub fn lookup(&self, server: usize, tier: u32, event_type: &str) -> Option<f64> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.server == server && e.tier == tier && e.event_type == event_type)?;
        if entry.rate.is_finite() {
            Some(entry.rate)
        } else {
            tracing::warn!(server, tier, event_type, "Ignoring non-finite calibration rate");
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
