//! Cutoff observations and their append-only store.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// One reported cutoff: the score needed to hold a tier at `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Cutoff score (event points)
    pub score: u64,
}

impl Observation {
    /// Create an observation.
    pub fn new(timestamp: i64, score: u64) -> Self {
        Self { timestamp, score }
    }

    /// Timestamp as a UTC datetime, `None` if out of chrono's range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Ordered, deduplicated observations for one (event, tier) pair.
///
/// Timestamps are non-decreasing. Exact `(timestamp, score)` duplicates are
/// collapsed; distinct scores reported at the same instant are both kept.
/// The store only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationStore {
    observations: Vec<Observation>,
}

impl ObservationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from observations in arbitrary order.
    ///
    /// Sorting is stable, so same-timestamp reports keep their source order.
    pub fn from_unordered(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.timestamp);
        let before = observations.len();
        let mut seen = HashSet::with_capacity(before);
        observations.retain(|o| seen.insert(*o));
        if observations.len() != before {
            tracing::debug!(
                dropped = before - observations.len(),
                "Dropped duplicate observations"
            );
        }
        Self { observations }
    }

    /// Append an observation.
    ///
    /// An exact duplicate of the tail is ignored.
    ///
    /// # Errors
    /// `ForecastError::OutOfOrder` if `observation` is older than the tail.
    pub fn push(&mut self, observation: Observation) -> Result<()> {
        if let Some(last) = self.observations.last() {
            if observation.timestamp < last.timestamp {
                return Err(ForecastError::OutOfOrder {
                    last_ts: last.timestamp,
                    ts: observation.timestamp,
                });
            }
            if *last == observation {
                return Ok(());
            }
        }
        self.observations.push(observation);
        Ok(())
    }

    /// Most recent observation.
    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }
}

impl<'a> IntoIterator for &'a ObservationStore {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
