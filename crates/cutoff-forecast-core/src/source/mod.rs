//! Data sources: where observations, event metadata, and calibration rates
//! come from.
//!
//! The engine only depends on the [`DataSource`] trait. Fetching, caching,
//! and retrying remote payloads belong to whoever implements it.
//!
//! Payload shapes follow the public tracker API:
//!
//! | Payload | Shape |
//! |---------|-------|
//! | tracker | `{"cutoffs": [{"time": 1662500000000, "ep": 12345}, ...]}` |
//! | rates   | `[{"server": 3, "tier": 100, "type": "story", "rate": 0.05}, ...]` |
//! | events  | `{"180": {"eventType": "story", "eventName": [..], "startAt": [..], "endAt": [..]}}` |

mod catalog;
mod directory;
mod memory;
mod payload;

#[cfg(test)]
mod tests;

pub use catalog::{fallback_schedule, EventCatalog, EventInfo};
pub use directory::JsonDirectorySource;
pub use memory::InMemorySource;
pub use payload::{RateEntry, RateTable, TrackerCutoff, TrackerPayload};

use crate::error::Result;
use crate::types::ObservationStore;

/// Supplier of everything one forecast needs.
///
/// Implementations must be shareable across threads: batch forecasting
/// queries one source from many workers at once.
pub trait DataSource: Send + Sync {
    /// Metadata for `event_id`.
    fn event(&self, event_id: u32) -> Result<EventInfo>;

    /// Cutoff observations for (`event_id`, `tier`).
    fn observations(&self, event_id: u32, tier: u32) -> Result<ObservationStore>;

    /// Calibration rate for (`server`, `tier`, `event_type`), `None` when the
    /// source has no rate for that combination.
    fn rate(&self, server: usize, tier: u32, event_type: &str) -> Result<Option<f64>>;
}
