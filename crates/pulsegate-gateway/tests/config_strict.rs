#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pulsegate_core::PulsegateError;
use pulsegate_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:3000"
metrics:
  duration_bucketz: [0.1, 0.5] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, PulsegateError::Config(_)));
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:3000");
    assert_eq!(cfg.metrics.duration_buckets, vec![0.1, 0.5, 1.0, 2.0, 5.0]);
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert!(matches!(err, PulsegateError::Config(_)));
}

#[test]
fn rejects_bad_listen_address() {
    let bad = r#"
version: 1
gateway:
  listen: "not-an-address"
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_unsorted_buckets() {
    let bad = r#"
version: 1
metrics:
  duration_buckets: [1.0, 0.5]
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, PulsegateError::Config(_)));
}
