//! # Context Spec - Domain Layer
//!
//! Core types shared by every layer of the context/specification harness.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Harness error type and `Result` alias |
//! | [`value_objects`] | Capabilities, double kinds, partial-mock arguments, policies |
//! | [`ports`] | Test-double factory port, erased doubles, subject constructors |
//!
//! The domain layer has no knowledge of how doubles are produced or how
//! subjects get wired; it only defines the contracts between the subject
//! factory (application layer) and the mocking collaborator (providers).

pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{BoxError, Error, Result};
pub use ports::{
    Arguments, Constructor, DefaultDouble, DoubleFactory, DoubleRequest, ErasedDouble, Parameter,
    Subject, Verifiable,
};
pub use value_objects::{CapabilityId, DoubleKind, PartialArgs, TieBreak};
