//! Tests for erased doubles and subject constructors

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cspec_domain::{
    CapabilityId, Constructor, DefaultDouble, DoubleKind, DoubleRequest, ErasedDouble, Error,
    Parameter, Result, Subject, Verifiable,
};

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

trait Logger: Send + Sync {}

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

impl DefaultDouble for dyn Clock {
    fn default_double() -> Arc<Self> {
        Arc::new(FixedClock(0))
    }
}

struct CountingVerifier(AtomicUsize);

impl Verifiable for CountingVerifier {
    fn verify(&self) -> Result<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Err(Error::expectation("dyn Clock", "now(any arguments): expected exactly 1 call(s), got 0"))
    }
}

fn clock(now: u64) -> ErasedDouble {
    let concrete = Arc::new(FixedClock(now));
    let handle: Arc<dyn Clock> = concrete.clone();
    ErasedDouble::new(DoubleKind::Mock, handle).with_view(concrete)
}

#[test]
fn erased_double_offers_its_views() {
    let double = clock(5);

    assert_eq!(double.primary(), CapabilityId::of::<dyn Clock>());
    assert!(double.satisfies(&CapabilityId::of::<FixedClock>()));
    assert!(!double.satisfies(&CapabilityId::of::<dyn Logger>()));
    assert_eq!(double.view::<dyn Clock>().unwrap().now(), 5);
    assert_eq!(double.view::<FixedClock>().unwrap().0, 5);
    assert!(double.view::<dyn Logger>().is_none());
}

#[test]
fn clones_share_the_same_double() {
    let double = clock(1);
    let copy = double.clone();

    assert!(double.same_double(&copy));
    assert!(!double.same_double(&clock(1)));
}

#[test]
fn doubles_erased_from_one_handle_are_the_same_double() {
    let handle: Arc<dyn Clock> = Arc::new(FixedClock(3));
    let first = ErasedDouble::new(DoubleKind::Mock, handle.clone());
    let second = ErasedDouble::new(DoubleKind::Stub, handle);

    assert!(first.same_double(&second));
}

#[test]
fn doubles_without_verifier_always_pass() {
    assert!(clock(0).verify().is_ok());

    let verifier = Arc::new(CountingVerifier(AtomicUsize::new(0)));
    let verifying = clock(0).with_verifier(verifier.clone());
    assert!(matches!(
        verifying.verify(),
        Err(Error::ExpectationViolation { .. })
    ));
    assert_eq!(verifier.0.load(Ordering::SeqCst), 1);
}

#[test]
fn double_requests_carry_their_kind() {
    let capability = CapabilityId::of::<dyn Clock>();
    assert_eq!(DoubleRequest::mock(capability).kind, DoubleKind::Mock);
    assert_eq!(DoubleRequest::stub(capability).kind, DoubleKind::Stub);
    assert_eq!(
        DoubleRequest::partial(capability, cspec_domain::PartialArgs::new().with(1))
            .args
            .len(),
        1
    );
}

struct Alarm {
    clock: Arc<dyn Clock>,
}

impl Subject for Alarm {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::unary("new", |clock: Arc<dyn Clock>| Ok(Alarm { clock }))]
    }
}

#[test]
fn constructor_binds_arguments_in_order() {
    let constructor = Alarm::constructors().remove(0);
    assert_eq!(constructor.arity(), 1);
    assert_eq!(constructor.capabilities(), vec![CapabilityId::of::<dyn Clock>()]);

    let alarm = constructor.invoke(vec![clock(42)]).unwrap();
    assert_eq!(alarm.clock.now(), 42);
}

#[test]
fn constructor_rejects_wrong_argument_count() {
    let constructor = Alarm::constructors().remove(0);
    let err = constructor.invoke(Vec::new()).err().unwrap();
    assert!(matches!(err, Error::InvalidArgument { .. }), "{err}");
}

#[test]
fn constructor_rejects_mismatched_capability() {
    struct Silent;
    impl Logger for Silent {}

    let logger: Arc<dyn Logger> = Arc::new(Silent);
    let constructor = Alarm::constructors().remove(0);
    let err = constructor
        .invoke(vec![ErasedDouble::new(DoubleKind::Stub, logger)])
        .err()
        .unwrap();
    assert!(matches!(err, Error::CapabilityMismatch { .. }), "{err}");
}

#[test]
fn unit_subject_has_a_nullary_constructor() {
    let constructors = <() as Subject>::constructors();
    assert_eq!(constructors.len(), 1);
    assert_eq!(constructors[0].arity(), 0);
    assert!(constructors[0].invoke(Vec::new()).is_ok());
}

#[test]
fn parameters_carry_a_default_stand_in() {
    let parameter = Parameter::of::<dyn Clock>();
    assert_eq!(parameter.capability(), CapabilityId::of::<dyn Clock>());

    let fallback = parameter.fallback();
    assert_eq!(fallback.kind(), DoubleKind::Stub);
    assert_eq!(fallback.view::<dyn Clock>().unwrap().now(), 0);
    assert!(fallback.verify().is_ok());

    let alarm = Alarm::constructors()
        .remove(0)
        .invoke(vec![fallback])
        .unwrap();
    assert_eq!(alarm.clock.now(), 0);
}
