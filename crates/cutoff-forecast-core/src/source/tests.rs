//! Tests for payload parsing, the event catalog, and in-memory sources.

use super::*;
use crate::error::{ForecastError, SourceError};
use crate::types::Observation;

const EVENTS_JSON: &str = r#"{
    "170": {
        "eventType": "story",
        "eventName": ["Anchor JP", null, null, "Anchor CN", null],
        "startAt": ["1650000000000", null, null, "1662440400000", null],
        "endAt": ["1650600000000", null, null, "1663081140000", null]
    },
    "180": {
        "eventType": "versus",
        "eventName": ["Later JP", null, null, null, null],
        "startAt": ["1660000000000", null, null, null, null],
        "endAt": ["1660600000000", null, null, "1700000000000", null]
    },
    "12": {
        "eventType": "live_try",
        "eventName": ["Old Event", null, null, null, null],
        "startAt": [null, null, null, null, null],
        "endAt": [null, null, null, null, null]
    },
    "meta": {
        "eventType": "none"
    }
}"#;

fn catalog() -> EventCatalog {
    EventCatalog::from_json_str(EVENTS_JSON).expect("catalog parses")
}

// ============================================================================
// PAYLOADS
// ============================================================================

#[test]
fn test_tracker_payload_into_store() {
    let payload = TrackerPayload::from_json_str(
        r#"{"cutoffs": [
            {"time": 3000, "ep": 30},
            {"time": 1000, "ep": 10},
            {"time": 2000, "ep": 20},
            {"time": 1000, "ep": 10}
        ]}"#,
    )
    .expect("tracker parses");
    assert_eq!(payload.cutoffs.len(), 4);

    let store = payload.into_store();
    assert_eq!(
        store.as_slice(),
        &[
            Observation::new(1000, 10),
            Observation::new(2000, 20),
            Observation::new(3000, 30)
        ]
    );
    println!("[PASS] test_tracker_payload_into_store");
}

#[test]
fn test_tracker_payload_without_cutoffs() {
    let payload = TrackerPayload::from_json_str("{}").expect("empty object parses");
    assert!(payload.into_store().is_empty());
    println!("[PASS] test_tracker_payload_without_cutoffs");
}

#[test]
fn test_tracker_payload_malformed() {
    let err = TrackerPayload::from_json_str(r#"{"cutoffs": [{"time": "soon"}]}"#).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::Source(SourceError::Parse { what: "tracker", .. })
    ));
    println!("[PASS] test_tracker_payload_malformed");
}

#[test]
fn test_rate_table_lookup() {
    let table = RateTable::from_json_str(
        r#"[
            {"server": 3, "tier": 100, "type": "story", "rate": 0.05},
            {"server": 3, "tier": 100, "type": "versus", "rate": 0.12},
            {"server": 0, "tier": 100, "type": "story", "rate": 0.30},
            {"server": 3, "tier": 100, "type": "story", "rate": 0.99}
        ]"#,
    )
    .expect("rates parse");

    assert_eq!(table.len(), 4);
    assert_eq!(table.lookup(3, 100, "story"), Some(0.05));
    assert_eq!(table.lookup(3, 100, "versus"), Some(0.12));
    assert_eq!(table.lookup(0, 100, "story"), Some(0.30));
    assert_eq!(table.lookup(3, 200, "story"), None);
    assert_eq!(table.lookup(3, 100, "medley"), None);
    println!("[PASS] test_rate_table_lookup");
}

#[test]
fn test_rate_table_non_finite_is_missing() {
    let table = RateTable::new(vec![RateEntry {
        server: 3,
        tier: 100,
        event_type: "story".to_string(),
        rate: f64::NAN,
    }]);
    assert_eq!(table.lookup(3, 100, "story"), None);
    println!("[PASS] test_rate_table_non_finite_is_missing");
}

#[test]
fn test_rate_table_malformed() {
    let err = RateTable::from_json_str(r#"{"rate": 1}"#).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::Source(SourceError::Parse { what: "rates", .. })
    ));
    println!("[PASS] test_rate_table_malformed");
}

// ============================================================================
// CATALOG
// ============================================================================

#[test]
fn test_catalog_skips_non_numeric_keys() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get(170).expect("present").id, 170);
    assert!(matches!(
        catalog.get(999),
        Err(ForecastError::Source(SourceError::EventNotFound(999)))
    ));
    println!("[PASS] test_catalog_skips_non_numeric_keys");
}

#[test]
fn test_display_name_fallbacks() {
    let catalog = catalog();
    let anchor = catalog.get(170).expect("present");
    assert_eq!(anchor.display_name(3), "Anchor CN");
    assert!(anchor.is_announced_on(3));

    let later = catalog.get(180).expect("present");
    assert_eq!(later.display_name(3), "Later JP");
    assert!(!later.is_announced_on(3));

    let nameless = EventInfo {
        id: 5,
        event_type: "story".to_string(),
        event_name: Vec::new(),
        start_at: Vec::new(),
        end_at: Vec::new(),
    };
    assert_eq!(nameless.display_name(3), "Event 5");
    println!("[PASS] test_display_name_fallbacks");
}

#[test]
fn test_schedule_explicit() {
    let catalog = catalog();
    let schedule = catalog.get(170).expect("present").schedule(3).expect("schedule");
    assert_eq!(schedule, (1_662_440_400_000, 1_663_081_140_000));
    println!("[PASS] test_schedule_explicit");
}

#[test]
fn test_schedule_falls_back_per_bound() {
    let catalog = catalog();
    let (expected_start, expected_end) = fallback_schedule(180).expect("after anchor");
    assert_eq!(expected_start, 1_662_440_400_000 + 10 * 9 * 86_400_000);
    assert_ne!(expected_end, 1_700_000_000_000);

    // startAt missing on CN, endAt present.
    let (start, end) = catalog.get(180).expect("present").schedule(3).expect("schedule");
    assert_eq!(start, expected_start);
    assert_eq!(end, 1_700_000_000_000);
    println!("[PASS] test_schedule_falls_back_per_bound");
}

#[test]
fn test_schedule_missing_before_anchor() {
    let catalog = catalog();
    let err = catalog.get(12).expect("present").schedule(3).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::Source(SourceError::MissingSchedule {
            event_id: 12,
            server: 3
        })
    ));
    println!("[PASS] test_schedule_missing_before_anchor");
}

#[test]
fn test_schedule_rejects_non_numeric_time() {
    let info = EventInfo {
        id: 200,
        event_type: "story".to_string(),
        event_name: Vec::new(),
        start_at: vec![Some("tomorrow".to_string())],
        end_at: vec![Some("1700000000000".to_string())],
    };
    let err = info.schedule(0).unwrap_err();
    match err {
        ForecastError::Source(SourceError::Parse { what, message }) => {
            assert_eq!(what, "events");
            assert!(message.contains("startAt"));
        }
        other => panic!("expected Parse, got {:?}", other),
    }
    println!("[PASS] test_schedule_rejects_non_numeric_time");
}

// ============================================================================
// IN-MEMORY SOURCE
// ============================================================================

#[test]
fn test_in_memory_source() {
    let info = catalog().get(170).expect("present").clone();
    let store = ObservationStore::from_unordered(vec![Observation::new(1, 2)]);
    let source = InMemorySource::new()
        .with_event(170, info)
        .with_observations(170, 100, store.clone())
        .with_rates(RateTable::new(vec![RateEntry {
            server: 3,
            tier: 100,
            event_type: "story".to_string(),
            rate: 0.2,
        }]));

    assert_eq!(source.event(170).expect("event").event_type, "story");
    assert_eq!(source.observations(170, 100).expect("store"), store);
    assert_eq!(source.rate(3, 100, "story").expect("rate"), Some(0.2));
    assert_eq!(source.rate(3, 100, "versus").expect("rate"), None);

    let err = source.observations(170, 50).unwrap_err();
    assert!(err.is_recoverable());
    println!("[PASS] test_in_memory_source");
}
