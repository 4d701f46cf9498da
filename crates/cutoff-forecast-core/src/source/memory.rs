//! In-memory data source.
//!
//! Holds everything in maps. Used by tests and by callers that already have
//! the payloads in hand (e.g. fetched by their own HTTP client).

use std::collections::HashMap;

use crate::error::{ForecastError, Result, SourceError};
use crate::types::ObservationStore;

use super::catalog::{EventCatalog, EventInfo};
use super::payload::RateTable;
use super::DataSource;

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    catalog: EventCatalog,
    observations: HashMap<(u32, u32), ObservationStore>,
    rates: RateTable,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_event(mut self, event_id: u32, info: EventInfo) -> Self {
        self.catalog.insert(info, event_id);
        self
    }

    #[must_use]
    pub fn with_observations(mut self, event_id: u32, tier: u32, store: ObservationStore) -> Self {
        self.observations.insert((event_id, tier), store);
        self
    }

    #[must_use]
    pub fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }
}

impl DataSource for InMemorySource {
    fn event(&self, event_id: u32) -> Result<EventInfo> {
        Ok(self.catalog.get(event_id)?.clone())
    }

    fn observations(&self, event_id: u32, tier: u32) -> Result<ObservationStore> {
        self.observations
            .get(&(event_id, tier))
            .cloned()
            .ok_or_else(|| {
                ForecastError::from(SourceError::Io {
                    path: format!("memory://tracker/{}-{}", event_id, tier),
                    message: "no observations loaded".to_string(),
                })
            })
    }

    fn rate(&self, server: usize, tier: u32, event_type: &str) -> Result<Option<f64>> {
        Ok(self.rates.lookup(server, tier, event_type))
    }
}
