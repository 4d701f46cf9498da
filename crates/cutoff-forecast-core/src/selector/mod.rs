//! Window selection: which observations are usable for regression.
//!
//! An observation is eligible iff
//!
//! ```text
//! timestamp - start_ts >= min_gap_from_start
//! timestamp <  end_ts - min_gap_before_end
//! ```
//!
//! Early data is too noisy to regress on and last-minute swings distort the
//! trend. An empty selection means "no forecast available", not an error.


use serde::{Deserialize, Serialize};

use crate::types::{EventWindow, Observation};

/// An eligible observation projected onto normalized event time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSample {
    /// Elapsed fraction of the event window
    pub percent: f64,
    /// Observed score
    pub score: f64,
}

impl NormalizedSample {
    /// Project `observation` onto `window`'s normalized time axis.
    pub fn from_observation(window: &EventWindow, observation: &Observation) -> Self {
        Self {
            percent: window.percent(observation.timestamp),
            score: observation.score as f64,
        }
    }
}

/// Whether `timestamp` passes both edge-margin filters of `window`.
pub fn is_eligible(window: &EventWindow, timestamp: i64) -> bool {
    let since_start = timestamp.saturating_sub(window.start_ts());
    let cutoff = window
        .end_ts()
        .saturating_sub(window.min_gap_before_end_ms());
    since_start >= window.min_gap_from_start_ms() && timestamp < cutoff
}

/// Ordered subsequence of `observations` eligible for regression.
pub fn select_eligible(window: &EventWindow, observations: &[Observation]) -> Vec<Observation> {
    let eligible: Vec<Observation> = observations
        .iter()
        .filter(|o| is_eligible(window, o.timestamp))
        .copied()
        .collect();

    tracing::debug!(
        total = observations.len(),
        eligible = eligible.len(),
        tier = window.tier(),
        "Window selection complete"
    );
    eligible
}

/// Eligible observations projected to normalized samples, in input order.
pub fn normalized_samples(window: &EventWindow, observations: &[Observation]) -> Vec<NormalizedSample> {
    observations
        .iter()
        .filter(|o| is_eligible(window, o.timestamp))
        .map(|o| NormalizedSample::from_observation(window, o))
        .collect()
}
