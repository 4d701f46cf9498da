//! Event catalog and schedule resolution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::constants::source::{
    SCHEDULE_ANCHOR_END_MS, SCHEDULE_ANCHOR_EVENT, SCHEDULE_ANCHOR_START_MS, SCHEDULE_CADENCE_MS,
};
use crate::error::{ForecastError, Result, SourceError};

/// Metadata of one event. Per-server fields are arrays indexed by server;
/// entries are `null` where the event has not run on that server yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    /// Catalog key; filled in when loading the catalog
    #[serde(skip)]
    pub id: u32,
    pub event_type: String,
    #[serde(default)]
    pub event_name: Vec<Option<String>>,
    /// Start times as decimal millisecond strings
    #[serde(default)]
    pub start_at: Vec<Option<String>>,
    /// End times as decimal millisecond strings
    #[serde(default)]
    pub end_at: Vec<Option<String>>,
}

impl EventInfo {
    /// Name on `server`, falling back to the first server's name, then to
    /// `"Event <id>"`.
    pub fn display_name(&self, server: usize) -> String {
        slot(&self.event_name, server)
            .or_else(|| slot(&self.event_name, 0))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Event {}", self.id))
    }

    /// Whether `server` has a name for this event, i.e. it has been announced
    /// there.
    pub fn is_announced_on(&self, server: usize) -> bool {
        slot(&self.event_name, server).is_some()
    }

    /// `(start_ts, end_ts)` on `server`.
    ///
    /// Missing entries are derived from the fixed event cadence
    /// ([`fallback_schedule`]); each bound falls back independently.
    ///
    /// # Errors
    /// - `SourceError::Parse` if a present entry is not an integer
    /// - `SourceError::MissingSchedule` if an entry is missing and the event
    ///   predates the cadence anchor
    pub fn schedule(&self, server: usize) -> Result<(i64, i64)> {
        let start = parse_ts(slot(&self.start_at, server), "startAt")?;
        let end = parse_ts(slot(&self.end_at, server), "endAt")?;

        if let (Some(start), Some(end)) = (start, end) {
            return Ok((start, end));
        }

        let (fallback_start, fallback_end) =
            fallback_schedule(self.id).ok_or(SourceError::MissingSchedule {
                event_id: self.id,
                server,
            })?;
        tracing::debug!(
            event_id = self.id,
            server,
            "Deriving missing event schedule from cadence"
        );
        Ok((start.unwrap_or(fallback_start), end.unwrap_or(fallback_end)))
    }
}

/// Schedule derived from the fixed cadence for events at or after the anchor.
///
/// ```rust
/// use cutoff_forecast_core::source::fallback_schedule;
///
/// let (start, end) = fallback_schedule(171).unwrap();
/// assert_eq!(start, 1_662_440_400_000 + 9 * 86_400_000);
/// assert_eq!(end - start, 1_663_081_140_000 - 1_662_440_400_000);
/// assert!(fallback_schedule(169).is_none());
/// ```
pub fn fallback_schedule(event_id: u32) -> Option<(i64, i64)> {
    if event_id < SCHEDULE_ANCHOR_EVENT {
        return None;
    }
    let offset = i64::from(event_id - SCHEDULE_ANCHOR_EVENT).checked_mul(SCHEDULE_CADENCE_MS)?;
    Some((
        SCHEDULE_ANCHOR_START_MS.checked_add(offset)?,
        SCHEDULE_ANCHOR_END_MS.checked_add(offset)?,
    ))
}

/// All known events keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventCatalog {
    events: HashMap<u32, EventInfo>,
}

impl EventCatalog {
    /// Parse the catalog payload. Entries whose key is not a numeric id are
    /// skipped with a warning.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, EventInfo> =
            serde_json::from_str(json).map_err(|e| SourceError::Parse {
                what: "events",
                message: e.to_string(),
            })?;

        let mut events = HashMap::with_capacity(raw.len());
        for (key, mut info) in raw {
            match key.parse::<u32>() {
                Ok(id) => {
                    info.id = id;
                    events.insert(id, info);
                }
                Err(_) => tracing::warn!(key = %key, "Skipping catalog entry with non-numeric id"),
            }
        }
        Ok(Self { events })
    }

    pub fn insert(&mut self, mut info: EventInfo, id: u32) {
        info.id = id;
        self.events.insert(id, info);
    }

    pub fn get(&self, event_id: u32) -> Result<&EventInfo> {
        self.events
            .get(&event_id)
            .ok_or(ForecastError::Source(SourceError::EventNotFound(event_id)))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn slot(values: &[Option<String>], server: usize) -> Option<&str> {
    values.get(server).and_then(|v| v.as_deref())
}

fn parse_ts(raw: Option<&str>, field: &'static str) -> Result<Option<i64>> {
    raw.map(|s| {
        s.trim().parse::<i64>().map_err(|e| {
            ForecastError::from(SourceError::Parse {
                what: "events",
                message: format!("{} value '{}': {}", field, s, e),
            })
        })
    })
    .transpose()
}
