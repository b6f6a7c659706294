//! Tests for capabilities, double kinds, partial-mock arguments and policies

use cspec_domain::{CapabilityId, DoubleKind, Error, PartialArgs, TieBreak};
use serde_json::json;

trait Clock: Send + Sync {}

#[test]
fn capability_identity_follows_the_type() {
    assert_eq!(CapabilityId::of::<dyn Clock>(), CapabilityId::of::<dyn Clock>());
    assert_ne!(CapabilityId::of::<dyn Clock>(), CapabilityId::of::<u64>());
    assert!(CapabilityId::of::<dyn Clock>().name().contains("Clock"));
}

#[test]
fn only_stubs_skip_verification() {
    assert!(DoubleKind::Mock.verifies());
    assert!(DoubleKind::PartialMock.verifies());
    assert!(!DoubleKind::Stub.verifies());
    assert_eq!(DoubleKind::PartialMock.to_string(), "partial_mock");
}

#[test]
fn tie_break_defaults_to_declaration_order() {
    assert_eq!(TieBreak::default(), TieBreak::FirstDeclared);
    let parsed: TieBreak = serde_json::from_value(json!("reject")).unwrap();
    assert_eq!(parsed, TieBreak::Reject);
}

#[test]
fn partial_args_read_back_in_order() {
    let args = PartialArgs::new().with(7).with("seven");

    assert_eq!(args.len(), 2);
    assert_eq!(args.get::<u64>(0).unwrap(), 7);
    assert_eq!(args.get::<String>(1).unwrap(), "seven");
    assert_eq!(args.value(1), Some(&json!("seven")));
}

#[test]
fn partial_args_fall_back_only_when_missing() {
    let args = PartialArgs::new().with("not a number");

    assert_eq!(args.get_or::<u64>(3, 9).unwrap(), 9);
    assert!(matches!(
        args.get_or::<u64>(0, 9),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn missing_partial_arg_is_invalid() {
    let err = PartialArgs::new().get::<u64>(0).unwrap_err();
    assert!(err.to_string().contains("#0 missing"), "{err}");
}

#[test]
fn partial_args_accept_serializable_values() {
    #[derive(serde::Serialize)]
    struct Seed {
        base: u64,
    }

    let args = PartialArgs::new().with_serialized(&Seed { base: 3 }).unwrap();
    assert_eq!(args.value(0), Some(&json!({ "base": 3 })));
}
