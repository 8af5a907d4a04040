//! Registry registration rules and the text exposition output.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pulsegate_core::{PulsegateError, Registry};

const BUCKETS: [f64; 5] = [0.1, 0.5, 1.0, 2.0, 5.0];

#[test]
fn duplicate_name_is_rejected_and_original_survives() {
    let registry = Registry::new();

    let requests = registry
        .register_counter("http_requests_total", "Total HTTP requests", &["method"])
        .unwrap();
    requests.inc(&[("method", "GET")]).unwrap();

    // A second registration under the same name fails regardless of kind.
    let err = registry
        .register_gauge("http_requests_total", "clash", &[])
        .expect_err("must reject");
    assert!(matches!(err, PulsegateError::DuplicateName(_)));

    // The original family's state is unaffected.
    let out = registry.render();
    assert!(out.contains("http_requests_total{method=\"GET\"} 1\n"));
}

#[test]
fn counter_block_renders_one_line_per_series() {
    let registry = Registry::new();
    let requests = registry
        .register_counter(
            "http_requests_total",
            "Total HTTP requests",
            &["method", "route"],
        )
        .unwrap();

    requests.inc(&[("method", "POST"), ("route", "/user/login")]).unwrap();
    requests.inc(&[("method", "GET"), ("route", "/example")]).unwrap();
    requests.inc(&[("method", "GET"), ("route", "/example")]).unwrap();

    let out = registry.render();
    assert!(out.contains("# HELP http_requests_total Total HTTP requests\n"));
    assert!(out.contains("# TYPE http_requests_total counter\n"));
    assert!(out.contains("http_requests_total{method=\"GET\",route=\"/example\"} 2\n"));
    assert!(out.contains("http_requests_total{method=\"POST\",route=\"/user/login\"} 1\n"));
    assert_eq!(out.matches("\nhttp_requests_total{").count(), 2);
}

#[test]
fn unlabeled_series_render_without_braces() {
    let registry = Registry::new();
    let active = registry
        .register_gauge("active_users", "Currently active users", &[])
        .unwrap();
    active.inc(&[]).unwrap();

    let out = registry.render();
    assert!(out.contains("# TYPE active_users gauge\n"));
    assert!(out.contains("\nactive_users 1\n"));
}

#[test]
fn histogram_block_is_cumulative_with_inf_sum_count() {
    let registry = Registry::new();
    let duration = registry
        .register_histogram(
            "http_response_duration_seconds",
            "HTTP response duration in seconds",
            &["method", "route"],
            &BUCKETS,
        )
        .unwrap();

    duration.observe(&[("method", "GET"), ("route", "/x")], 0.3).unwrap();

    let out = registry.render();
    let labels = "method=\"GET\",route=\"/x\"";
    assert!(out.contains(&format!(
        "http_response_duration_seconds_bucket{{{labels},le=\"0.1\"}} 0\n"
    )));
    assert!(out.contains(&format!(
        "http_response_duration_seconds_bucket{{{labels},le=\"0.5\"}} 1\n"
    )));
    assert!(out.contains(&format!(
        "http_response_duration_seconds_bucket{{{labels},le=\"5\"}} 1\n"
    )));
    assert!(out.contains(&format!(
        "http_response_duration_seconds_bucket{{{labels},le=\"+Inf\"}} 1\n"
    )));
    assert!(out.contains(&format!(
        "http_response_duration_seconds_sum{{{labels}}} 0.3\n"
    )));
    assert!(out.contains(&format!(
        "http_response_duration_seconds_count{{{labels}}} 1\n"
    )));
}

#[test]
fn render_is_deterministic_for_unchanged_state() {
    let registry = Registry::new();
    let requests = registry
        .register_counter("http_requests_total", "Total HTTP requests", &["route"])
        .unwrap();
    let duration = registry
        .register_histogram(
            "http_response_duration_seconds",
            "HTTP response duration in seconds",
            &["route"],
            &BUCKETS,
        )
        .unwrap();

    for route in ["/a", "/b", "/c"] {
        requests.inc(&[("route", route)]).unwrap();
        duration.observe(&[("route", route)], 0.2).unwrap();
    }

    assert_eq!(registry.render(), registry.render());
}

#[test]
fn families_render_in_registration_order() {
    let registry = Registry::new();
    registry.register_counter("zzz_total", "last name, first registered", &[]).unwrap();
    registry.register_gauge("aaa_current", "first name, last registered", &[]).unwrap();

    let out = registry.render();
    let zzz = out.find("# TYPE zzz_total").unwrap();
    let aaa = out.find("# TYPE aaa_current").unwrap();
    assert!(zzz < aaa);
}

#[test]
fn label_values_are_escaped() {
    let registry = Registry::new();
    let c = registry
        .register_counter("odd_labels_total", "escaping", &["path"])
        .unwrap();
    c.inc(&[("path", "a\\b\"c\nd")]).unwrap();

    let out = registry.render();
    assert!(out.contains("odd_labels_total{path=\"a\\\\b\\\"c\\nd\"} 1\n"));
}
