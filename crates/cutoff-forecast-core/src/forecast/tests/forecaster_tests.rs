//! CalibratedForecaster and IncrementalForecaster tests.

use super::*;
use crate::error::ForecastError;
use crate::forecast::{round_score, CalibratedForecaster, IncrementalForecaster};
use crate::regression::RegressionFit;

fn fit(slope: f64, intercept: f64) -> RegressionFit {
    RegressionFit {
        slope,
        intercept,
        correlation: None,
        count: 5,
    }
}

#[test]
fn test_round_score_rules() {
    assert_eq!(round_score(2.5), 3);
    assert_eq!(round_score(2.4999), 2);
    assert_eq!(round_score(1999.5), 2000);
    assert_eq!(round_score(-0.4), 0);
    assert_eq!(round_score(-1_000.0), 0);
    assert_eq!(round_score(f64::NAN), 0);
    assert_eq!(round_score(f64::INFINITY), u64::MAX);
    println!("[PASS] test_round_score_rules");
}

#[test]
fn test_zero_rate_evaluates_at_event_end() {
    let forecaster = CalibratedForecaster::new(0.0).expect("finite");
    let f = fit(2_000.0, 150.0);
    assert_eq!(forecaster.predict_raw(&f), 2_150.0);
    assert_eq!(forecaster.predict(&f), 2_150);
    println!("[PASS] test_zero_rate_evaluates_at_event_end");
}

#[test]
fn test_rate_shifts_evaluation_point() {
    let up = CalibratedForecaster::new(0.1).expect("finite");
    let down = CalibratedForecaster::new(-0.3).expect("finite");
    let f = fit(2_000.0, 0.0);
    assert_eq!(up.predict(&f), 2_200);
    assert_eq!(down.predict(&f), 1_400);
    println!("[PASS] test_rate_shifts_evaluation_point");
}

#[test]
fn test_negative_prediction_clamped() {
    let forecaster = CalibratedForecaster::new(0.0).expect("finite");
    assert_eq!(forecaster.predict(&fit(-5_000.0, 1_000.0)), 0);
    println!("[PASS] test_negative_prediction_clamped");
}

#[test]
fn test_non_finite_rate_rejected() {
    for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = CalibratedForecaster::new(rate).unwrap_err();
        assert!(matches!(err, ForecastError::Validation(_)));
    }
    println!("[PASS] test_non_finite_rate_rejected");
}

#[test]
fn test_incremental_emits_from_threshold_on() {
    let forecaster = CalibratedForecaster::new(0.0).expect("finite");
    let mut inc = IncrementalForecaster::new(ten_day_window(), forecaster, 5);

    let mut emitted = Vec::new();
    for (i, obs) in perfect_line_store().iter().enumerate() {
        let point = inc.push(*obs).expect("ordered input");
        if i < 4 {
            assert!(point.is_none(), "no point before 5 samples (i={})", i);
        } else {
            emitted.push(point.expect("point at 5th sample"));
        }
    }

    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].timestamp, at_percent(0.70, 0).timestamp);
    assert!((emitted[0].predicted_score as i64 - 2_000).abs() <= 1);
    println!("[PASS] test_incremental_emits_from_threshold_on");
}

#[test]
fn test_incremental_ignores_ineligible() {
    let forecaster = CalibratedForecaster::default();
    let mut inc = IncrementalForecaster::new(ten_day_window(), forecaster, 5);

    // Inside the start margin and inside the end margin.
    assert_eq!(inc.push(Observation::new(HOUR_MS, 10)).expect("ok"), None);
    assert_eq!(
        inc.push(Observation::new(TEN_DAYS_MS - HOUR_MS, 10)).expect("ok"),
        None
    );
    assert!(inc.eligible().is_empty());
    println!("[PASS] test_incremental_ignores_ineligible");
}

#[test]
fn test_incremental_rejects_out_of_order_without_mutation() {
    let mut inc = IncrementalForecaster::new(ten_day_window(), CalibratedForecaster::default(), 5);
    inc.push(at_percent(0.6, 100)).expect("first");
    let err = inc.push(at_percent(0.5, 90)).unwrap_err();
    assert!(matches!(err, ForecastError::OutOfOrder { .. }));
    assert_eq!(inc.eligible().len(), 1);
    println!("[PASS] test_incremental_rejects_out_of_order_without_mutation");
}

#[test]
fn test_degenerate_prefixes_skipped_then_recover() {
    let mut inc = IncrementalForecaster::new(ten_day_window(), CalibratedForecaster::default(), 5);
    let ts = at_percent(0.5, 0).timestamp;

    for score in [100, 110, 120, 130, 140, 150] {
        assert_eq!(inc.push(Observation::new(ts, score)).expect("ok"), None);
    }
    assert!(inc.points().is_empty());

    // A later timestamp gives the prefix spread in time again.
    let point = inc.push(at_percent(0.6, 400)).expect("ok");
    assert!(point.is_some());

    let forecast = inc.finish();
    assert_eq!(forecast.degenerate_prefixes, 2);
    assert_eq!(forecast.points.len(), 1);
    assert_eq!(forecast.eligible.len(), 7);
    println!("[PASS] test_degenerate_prefixes_skipped_then_recover");
}

#[test]
fn test_points_are_append_only() {
    let observations: Vec<Observation> = (0..30)
        .map(|i| at_percent(0.06 + i as f64 * 0.02, 500 + (i * i) as u64 * 13))
        .collect();

    let mut inc = IncrementalForecaster::new(ten_day_window(), CalibratedForecaster::default(), 5);
    let mut previous = Vec::new();
    for obs in observations {
        inc.push(obs).expect("ordered");
        let current = inc.points().to_vec();
        assert!(current.len() >= previous.len());
        assert_eq!(&current[..previous.len()], &previous[..]);
        previous = current;
    }
    println!("[PASS] test_points_are_append_only");
}

#[test]
fn test_snapshot_does_not_consume() {
    let mut inc = IncrementalForecaster::new(ten_day_window(), CalibratedForecaster::default(), 5);
    for obs in perfect_line_store().iter() {
        inc.push(*obs).expect("ordered");
    }
    let snapshot = inc.snapshot();
    assert_eq!(snapshot.points, inc.points());
    inc.push(at_percent(0.75, 1500)).expect("ordered");
    assert_eq!(inc.points().len(), snapshot.points.len() + 1);
    println!("[PASS] test_snapshot_does_not_consume");
}

#[test]
fn test_repeated_tail_matches_deduplicated_store() {
    let engine = crate::forecast::ForecastEngine::default();
    let window = ten_day_window();
    let store = perfect_line_store();
    let tail = *store.latest().expect("non-empty");

    let mut live = engine.incremental(&window, Some(0.0)).expect("finite rate");
    for obs in store.iter() {
        live.push(*obs).expect("ordered");
    }
    // A tracker poll re-sending its latest point.
    assert_eq!(live.push(tail).expect("duplicate is not an error"), None);

    let mut deduped = store.clone();
    deduped.push(tail).expect("duplicate is not an error");
    assert_eq!(deduped.len(), 5);

    let batch = engine.run(&deduped, &window, Some(0.0)).expect("run");
    let live = live.finish();
    assert_eq!(live.eligible.len(), 5);
    assert_eq!(live.points, batch.points);
    assert_eq!(live.points.len(), live.eligible.len() - 5 + 1);
    println!("[PASS] test_repeated_tail_matches_deduplicated_store");
}

#[test]
fn test_same_timestamp_new_score_still_counts() {
    let mut inc = IncrementalForecaster::new(ten_day_window(), CalibratedForecaster::default(), 5);
    let ts = at_percent(0.5, 0).timestamp;
    inc.push(Observation::new(ts, 100)).expect("first");
    inc.push(Observation::new(ts, 100)).expect("repeat");
    inc.push(Observation::new(ts, 120)).expect("new score");
    assert_eq!(inc.eligible().len(), 2);
    println!("[PASS] test_same_timestamp_new_score_still_counts");
}
