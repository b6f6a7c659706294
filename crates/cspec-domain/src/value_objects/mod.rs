//! Domain Value Objects
//!
//! Immutable values describing what a test double stands in for and how
//! the subject factory should behave.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`CapabilityId`] | Identity of an interface (usually a `dyn Trait`) a double fulfils |
//! | [`DoubleKind`] | Mock, stub or partial mock |
//! | [`PartialArgs`] | Constructor arguments seeding a partial mock |
//! | [`TieBreak`] | Policy for constructors of equal maximum arity |

/// Capability identity
pub mod capability;
/// Test-double kinds
pub mod kind;
/// Partial-mock constructor arguments
pub mod args;
/// Subject factory policies
pub mod policy;

pub use args::PartialArgs;
pub use capability::CapabilityId;
pub use kind::DoubleKind;
pub use policy::TieBreak;
