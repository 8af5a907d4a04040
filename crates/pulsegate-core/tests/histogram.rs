//! Histogram bucket accumulation, bucket-spec validation, and timers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use pulsegate_core::{HistogramVec, LabelSchema, PulsegateError};

const BUCKETS: [f64; 5] = [0.1, 0.5, 1.0, 2.0, 5.0];

fn duration_vec() -> HistogramVec {
    HistogramVec::new(LabelSchema::new(&["method", "route"]), &BUCKETS).unwrap()
}

#[test]
fn observe_fills_cumulative_buckets() {
    let vec = duration_vec();
    let labels = [("method", "GET"), ("route", "/x")];

    vec.observe(&labels, 0.3).unwrap();

    let snap = vec.get_or_create(&labels).unwrap().snapshot();
    // 0.3 lands in every bucket with bound >= 0.3, not in 0.1.
    assert_eq!(snap.buckets, vec![0, 1, 1, 1, 1]);
    assert_eq!(snap.count, 1);
    assert_eq!(snap.sum, 0.3);
}

#[test]
fn observations_accumulate() {
    let vec = duration_vec();
    let labels = [("method", "GET"), ("route", "/x")];

    vec.observe(&labels, 0.05).unwrap();
    vec.observe(&labels, 0.3).unwrap();
    vec.observe(&labels, 7.0).unwrap();

    let snap = vec.get_or_create(&labels).unwrap().snapshot();
    assert_eq!(snap.buckets, vec![1, 2, 2, 2, 2]);
    assert_eq!(snap.count, 3);
    assert!((snap.sum - 7.35).abs() < 1e-9);
}

#[test]
fn value_on_bound_counts_into_its_bucket() {
    let vec = duration_vec();
    let labels = [("method", "GET"), ("route", "/x")];

    vec.observe(&labels, 0.5).unwrap();

    let snap = vec.get_or_create(&labels).unwrap().snapshot();
    assert_eq!(snap.buckets, vec![0, 1, 1, 1, 1]);
}

#[test]
fn bad_bucket_specs_are_rejected() {
    let schema = || LabelSchema::new(&[]);

    let empty = HistogramVec::new(schema(), &[]);
    let not_increasing = HistogramVec::new(schema(), &[0.1, 0.1, 0.5]);
    let descending = HistogramVec::new(schema(), &[1.0, 0.5]);
    let infinite = HistogramVec::new(schema(), &[0.1, f64::INFINITY]);

    for r in [empty, not_increasing, descending, infinite] {
        assert!(matches!(
            r.err().expect("must reject"),
            PulsegateError::BadBucketSpec(_)
        ));
    }
}

#[test]
fn timer_observes_elapsed_seconds_once() {
    let vec = duration_vec();
    let labels = [("method", "POST"), ("route", "/user/login")];

    let timer = vec.start_timer(&labels).unwrap();
    std::thread::sleep(Duration::from_millis(10));
    let elapsed = timer.observe_duration();

    assert!(elapsed >= 0.010);
    let snap = vec.get_or_create(&labels).unwrap().snapshot();
    assert_eq!(snap.count, 1);
    assert!(snap.sum >= 0.010);
    // A short sleep must not land in the slow buckets' complement.
    assert_eq!(snap.buckets[0], 1);
}

#[test]
fn abandoned_timer_never_observes() {
    let vec = duration_vec();
    let labels = [("method", "GET"), ("route", "/x")];

    drop(vec.start_timer(&labels).unwrap());

    let snap = vec.get_or_create(&labels).unwrap().snapshot();
    assert_eq!(snap.count, 0);
}
