//! # Context Spec - Test-Double Providers
//!
//! The mocking collaborator behind the `DoubleFactory` port.
//!
//! ## Contents
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`doubles`] | `Behavior` call recorder, `TestDouble`, `register_double!` |
//! | [`factory`] | `CatalogDoubleFactory` (runtime + linked blueprints), `NullDoubleFactory` |
//!
//! ## Kinds
//!
//! | Kind | Behavior | Verification |
//! |------|----------|--------------|
//! | Mock | records calls, returns configured values | fails on unmet expectations |
//! | Stub | returns defaults or stubbed values | never fails |
//! | Partial mock | real logic unless a member is overridden | fails on unmet expectations |

pub use cspec_application::ports::registry::{BlueprintEntry, DOUBLE_BLUEPRINTS};
pub use cspec_domain::error::{Error, Result};
pub use cspec_domain::ports::{DoubleFactory, DoubleRequest, ErasedDouble};
pub use cspec_domain::value_objects::{CapabilityId, DoubleKind, PartialArgs};

#[doc(hidden)]
pub use linkme;

/// Call recorder and double types
pub mod doubles;

/// Double factories
pub mod factory;

pub use doubles::{Behavior, Call, Expectation, TestDouble, Times, erase};
pub use factory::{CatalogDoubleFactory, NullDoubleFactory};
