//! Tests for error module.

use super::*;

#[test]
fn test_contract_violation_classification() {
    let e = ForecastError::InvalidWindow {
        start_ts: 100,
        end_ts: 100,
    };
    assert!(e.is_contract_violation());
    assert!(!e.is_recoverable());

    let e = ForecastError::OutOfOrder {
        last_ts: 2_000,
        ts: 1_000,
    };
    assert!(e.is_contract_violation());

    let e = ForecastError::Config(ConfigError::Parse("bad".to_string()));
    assert!(e.is_contract_violation());

    let e = ForecastError::Source(SourceError::EventNotFound(7));
    assert!(!e.is_contract_violation());

    let e = ForecastError::Validation("rate is NaN".to_string());
    assert!(!e.is_contract_violation());

    println!("[PASS] Contract violations classified correctly");
}

#[test]
fn test_only_source_io_is_recoverable() {
    let e = ForecastError::Source(SourceError::Io {
        path: "tracker/1-100.json".to_string(),
        message: "connection reset".to_string(),
    });
    assert!(e.is_recoverable());

    let e = ForecastError::Source(SourceError::Parse {
        what: "tracker",
        message: "expected value".to_string(),
    });
    assert!(!e.is_recoverable());

    println!("[PASS] is_recoverable() works correctly");
}

#[test]
fn test_display_messages() {
    let e = ForecastError::InvalidWindow {
        start_ts: 5,
        end_ts: 3,
    };
    let msg = e.to_string();
    assert!(msg.contains("end_ts 3"), "got: {}", msg);
    assert!(msg.contains("start_ts 5"), "got: {}", msg);

    let e = ForecastError::from(SourceError::MissingSchedule {
        event_id: 12,
        server: 3,
    });
    assert_eq!(
        e.to_string(),
        "Source error: Event 12 has no schedule for server 3"
    );

    let e = ForecastError::from(ConfigError::Invalid {
        field: "min_samples",
        message: "must be >= 2, got 1".to_string(),
    });
    assert_eq!(
        e.to_string(),
        "Configuration error: Invalid value for 'min_samples': must be >= 2, got 1"
    );

    println!("[PASS] Error display messages are descriptive");
}

#[test]
fn test_from_conversions() {
    fn fails() -> Result<()> {
        Err(SourceError::EventNotFound(99))?
    }

    match fails() {
        Err(ForecastError::Source(SourceError::EventNotFound(99))) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    println!("[PASS] ? converts sub-errors into ForecastError");
}
