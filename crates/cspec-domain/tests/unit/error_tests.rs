//! Tests for the harness error type

use cspec_domain::Error;

#[test]
fn construction_is_seen_through_set_up() {
    let inner = Error::construction_panic("Service", "new", "boom");
    assert!(inner.is_construction());
    assert!(inner.to_string().contains("constructor panicked: boom"));

    let wrapped = Error::set_up("create_subject_under_test", inner);
    assert!(wrapped.is_construction());
    assert!(
        wrapped
            .to_string()
            .starts_with("Set-up failed in create_subject_under_test")
    );
}

#[test]
fn other_errors_are_not_construction() {
    assert!(!Error::unknown_capability("dyn Clock").is_construction());
    assert!(!Error::set_up("because", Error::generic("nope")).is_construction());
}

#[test]
fn messages_name_the_failing_parts() {
    assert_eq!(
        Error::unknown_capability("dyn Clock").to_string(),
        "Unknown capability: no test-double blueprint for dyn Clock"
    );
    assert_eq!(
        Error::expectation("dyn Logger", "log(any arguments): expected exactly 1, got 0")
            .to_string(),
        "Expectation violation on dyn Logger: log(any arguments): expected exactly 1, got 0"
    );
    assert_eq!(
        Error::observation("should return 0", "expected 0, got 1").to_string(),
        "Observation 'should return 0' failed: expected 0, got 1"
    );
}

#[test]
fn generic_keeps_the_message() {
    let err = Error::generic("plain failure");
    assert!(matches!(err, Error::Generic(_)));
    assert_eq!(err.to_string(), "Generic error: plain failure");
}
