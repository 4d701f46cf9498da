//! Data source backed by JSON payloads on disk.

use std::path::{Path, PathBuf};

use crate::error::{ForecastError, Result, SourceError};
use crate::types::ObservationStore;

use super::catalog::{EventCatalog, EventInfo};
use super::payload::{RateTable, TrackerPayload};
use super::DataSource;

/// Reads payloads from a directory laid out as:
///
/// ```text
/// <root>/events.json
/// <root>/rates.json
/// <root>/tracker/<event_id>-<tier>.json
/// ```
///
/// Files are read on every call, so a sidecar process refreshing them is
/// picked up without restarting. A missing `rates.json` means no rate is
/// available; every other missing file is an error.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
}

impl JsonDirectorySource {
    pub const EVENTS_FILE: &'static str = "events.json";
    pub const RATES_FILE: &'static str = "rates.json";
    pub const TRACKER_DIR: &'static str = "tracker";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the tracker payload for (`event_id`, `tier`).
    pub fn tracker_path(&self, event_id: u32, tier: u32) -> PathBuf {
        self.root
            .join(Self::TRACKER_DIR)
            .join(format!("{}-{}.json", event_id, tier))
    }

    /// Load and parse the whole event catalog.
    pub fn catalog(&self) -> Result<EventCatalog> {
        let text = read(&self.root.join(Self::EVENTS_FILE))?;
        EventCatalog::from_json_str(&text)
    }
}

impl DataSource for JsonDirectorySource {
    fn event(&self, event_id: u32) -> Result<EventInfo> {
        Ok(self.catalog()?.get(event_id)?.clone())
    }

    fn observations(&self, event_id: u32, tier: u32) -> Result<ObservationStore> {
        let text = read(&self.tracker_path(event_id, tier))?;
        let store = TrackerPayload::from_json_str(&text)?.into_store();
        tracing::debug!(event_id, tier, observations = store.len(), "Loaded tracker payload");
        Ok(store)
    }

    fn rate(&self, server: usize, tier: u32, event_type: &str) -> Result<Option<f64>> {
        let path = self.root.join(Self::RATES_FILE);
        if !path.exists() {
            tracing::warn!(path = %path.display(), "No rates file; calibration unavailable");
            return Ok(None);
        }
        let table = RateTable::from_json_str(&read(&path)?)?;
        Ok(table.lookup(server, tier, event_type))
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ForecastError::from(SourceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })
}
