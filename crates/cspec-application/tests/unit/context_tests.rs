//! Tests for the test context: declaring doubles, building the subject,
//! trapping errors and disposal

use std::sync::Arc;

use cspec_application::{Context, ContextSettings};
use cspec_domain::{BoxError, DoubleKind, Error, PartialArgs, TieBreak};
use cspec_providers::{CatalogDoubleFactory, NullDoubleFactory, TestDouble};
use thiserror::Error as ThisError;

use crate::doubles::{
    Clock, ClockDouble, Counter, CounterDouble, Logger, LoggerDouble, Reporter, Service, Ticker,
    Unknown,
};

#[derive(Debug, ThisError)]
#[error("argument rejected: {0}")]
struct ArgumentError(String);

#[derive(Debug, ThisError)]
#[error("operation not allowed")]
struct InvalidOperation;

fn context<S: cspec_domain::Subject>() -> Context<S> {
    Context::new(Arc::new(CatalogDoubleFactory::with_linked()))
}

// ============================================================================
// Declaring dependencies
// ============================================================================

#[test]
fn test_dependency_is_registered_and_bound_by_identity() {
    let mut ctx = context::<Service>();
    let logger = ctx.dependency::<dyn Logger>().unwrap();
    assert_eq!(ctx.registry().len(), 1);
    assert_eq!(ctx.registry().get(0).unwrap().kind(), DoubleKind::Mock);

    let service = ctx.create_subject().unwrap();
    assert!(Arc::ptr_eq(&service.logger, &logger));

    let wiring = ctx.wiring().unwrap();
    assert_eq!(wiring.registered_count(), 1);
    assert_eq!(wiring.synthesized_count(), 1);
}

#[test]
fn test_mock_expectations_are_verified() {
    let mut ctx = context::<Service>();
    ctx.dependency::<dyn Logger>().unwrap();
    ctx.dependency_as_stub::<dyn Clock>().unwrap();
    ctx.resolve::<ClockDouble>()
        .unwrap()
        .behavior()
        .stub_returns("now", 1_700);

    let mock = ctx.resolve::<LoggerDouble>().unwrap();
    mock.behavior()
        .expect("log")
        .with_args(serde_json::json!(["1700: hello"]))
        .once();
    assert!(ctx.verify_all_expectations().is_err());

    let stamped = ctx.create_subject().unwrap().stamp("hello");
    assert_eq!(stamped, 1_700);
    assert!(ctx.verify_all_expectations().is_ok());
}

#[test]
fn test_stub_never_fails_verification() {
    let mut ctx = context::<Service>();
    ctx.dependency_as_stub::<dyn Logger>().unwrap();
    ctx.resolve::<LoggerDouble>()
        .unwrap()
        .behavior()
        .expect("log")
        .once();
    assert!(ctx.verify_all_expectations().is_ok());
}

#[test]
fn test_partial_mock_runs_real_logic_until_overridden() {
    let mut ctx = context::<Reporter>();
    let counter = ctx
        .dependency_as_partial::<dyn Counter>(PartialArgs::new().with(10))
        .unwrap();
    assert_eq!(counter.next(), 10);
    assert_eq!(counter.next(), 11);

    let double = ctx.resolve::<CounterDouble>().unwrap();
    double.behavior().override_member("next", 99);
    assert_eq!(counter.next(), 99);
    double.behavior().clear_override("next");
    assert_eq!(counter.next(), 12);
}

#[test]
fn test_register_instance_takes_precedence_over_synthesis() {
    let mut ctx = context::<Service>();
    let clock: Arc<dyn Clock> = Arc::new(crate::doubles::FixedClock(7));
    let registered = ctx.register_instance(clock);
    let service = ctx.create_subject().unwrap();
    assert!(Arc::ptr_eq(&service.clock, &registered));
}

#[test]
fn test_unknown_capability_is_reported() {
    let mut ctx = context::<Reporter>();
    assert!(matches!(
        ctx.dependency::<dyn Unknown>(),
        Err(Error::UnknownCapability { .. })
    ));

    let mut ctx = Context::<Reporter>::new(Arc::new(NullDoubleFactory::new()));
    assert!(ctx.dependency::<dyn Logger>().is_err());
    assert!(ctx.registry().is_empty());
}

// ============================================================================
// Subject under test
// ============================================================================

#[test]
fn test_subject_access_before_creation_fails() {
    let ctx = context::<Reporter>();
    assert!(!ctx.has_subject());
    assert!(matches!(ctx.sut(), Err(Error::SubjectNotCreated { .. })));
}

#[test]
fn test_subject_is_created_once() {
    let mut ctx = context::<Reporter>();
    ctx.create_subject().unwrap();
    assert!(ctx.has_subject());
    assert!(matches!(
        ctx.create_subject(),
        Err(Error::SubjectAlreadyCreated { .. })
    ));
    assert!(matches!(
        ctx.set_subject(Reporter {
            title: "other".to_string()
        }),
        Err(Error::SubjectAlreadyCreated { .. })
    ));
    assert_eq!(ctx.sut().unwrap().title, "report");
}

#[test]
fn test_build_subject_installs_nothing_but_keeps_wiring() {
    let mut ctx = context::<Reporter>();
    let built = ctx.build_subject().unwrap();
    assert_eq!(built.title, "report");
    assert!(!ctx.has_subject());
    assert_eq!(ctx.wiring().unwrap().constructor, "new");
}

#[test]
fn test_settings_select_tie_break() {
    let settings = ContextSettings {
        tie_break: TieBreak::Reject,
        ..ContextSettings::default()
    };
    let mut ctx = Context::<Ticker>::with_settings(
        Arc::new(CatalogDoubleFactory::with_linked()),
        settings,
    );
    assert!(matches!(
        ctx.create_subject(),
        Err(Error::AmbiguousConstructor { .. })
    ));
}

// ============================================================================
// Trapping
// ============================================================================

#[test]
fn test_trap_captures_expected_kind() {
    let mut ctx = context::<Reporter>();
    let outcome = ctx
        .trap::<ArgumentError, ()>(|| Err(Box::new(ArgumentError("bad".to_string()))))
        .unwrap();
    assert!(outcome.is_none());

    let caught = ctx.exception_caught_as::<ArgumentError>().unwrap();
    assert_eq!(caught.0, "bad");
    assert_eq!(
        ctx.exception_caught().unwrap().to_string(),
        "argument rejected: bad"
    );
}

#[test]
fn test_trap_propagates_other_kinds() {
    let mut ctx = context::<Reporter>();
    let result = ctx.trap::<ArgumentError, ()>(|| Err(Box::new(InvalidOperation)));
    match result {
        Err(Error::Untrapped { source }) => {
            assert!(source.downcast_ref::<InvalidOperation>().is_some());
        }
        other => panic!("expected untrapped error, got {other:?}"),
    }
    assert!(ctx.exception_caught().is_none());
}

#[test]
fn test_trap_passes_success_through_and_keeps_last_error() {
    let mut ctx = context::<Reporter>();
    ctx.trap::<ArgumentError, ()>(|| Err(Box::new(ArgumentError("first".to_string()))))
        .unwrap();
    ctx.trap::<ArgumentError, ()>(|| Err(Box::new(ArgumentError("second".to_string()))))
        .unwrap();
    assert_eq!(ctx.exception_caught_as::<ArgumentError>().unwrap().0, "second");

    let value = ctx.trap::<ArgumentError, u8>(|| Ok(5)).unwrap();
    assert_eq!(value, Some(5));
    assert!(ctx.exception_caught().is_some());

    let taken: BoxError = ctx.take_exception().unwrap();
    assert!(taken.is::<ArgumentError>());
    assert!(ctx.exception_caught().is_none());
}

#[test]
fn test_trap_on_sut_requires_subject() {
    let mut ctx = context::<Reporter>();
    assert!(matches!(
        ctx.trap_on_sut::<ArgumentError, ()>(|_| Ok(())),
        Err(Error::SubjectNotCreated { .. })
    ));

    ctx.create_subject().unwrap();
    let title = ctx
        .trap_on_sut::<ArgumentError, String>(|reporter| Ok(reporter.title.clone()))
        .unwrap();
    assert_eq!(title.as_deref(), Some("report"));
}

// ============================================================================
// Disposal
// ============================================================================

#[test]
fn test_dispose_releases_everything() {
    let mut ctx = context::<Service>();
    ctx.dependency::<dyn Logger>().unwrap();
    ctx.create_subject().unwrap();
    ctx.trap::<InvalidOperation, ()>(|| Err(Box::new(InvalidOperation)))
        .unwrap();

    ctx.dispose().unwrap();
    assert!(!ctx.has_subject());
    assert!(ctx.registry().is_empty());
    assert!(ctx.exception_caught().is_none());
    assert!(ctx.wiring().is_none());
}

#[test]
fn test_dispose_verifies_mocks_when_configured() {
    let settings = ContextSettings {
        verify_mocks_on_tear_down: true,
        ..ContextSettings::default()
    };
    let mut ctx =
        Context::<Reporter>::with_settings(Arc::new(CatalogDoubleFactory::with_linked()), settings);
    ctx.dependency::<dyn Logger>().unwrap();
    ctx.resolve::<LoggerDouble>()
        .unwrap()
        .behavior()
        .expect("log")
        .once();

    assert!(matches!(
        ctx.dispose(),
        Err(Error::ExpectationViolation { .. })
    ));
    assert!(ctx.registry().is_empty(), "released even when verification fails");
}
