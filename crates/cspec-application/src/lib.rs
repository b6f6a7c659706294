//! # Context Spec - Application Layer
//!
//! Orchestrates a test context: declaring test doubles, wiring the subject
//! under test, running the set-up phases and trapping expected errors.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain_services`] | Dependency registry and the auto-wiring subject factory |
//! | [`use_cases`] | Test context and the specification lifecycle fixture |
//! | [`ports`] | Blueprint registry (linkme distributed slice) |
//! | [`assertions`] | Fluent `should()` assertions for observations |
//!
//! ## Flow
//!
//! ```text
//! establish_context ──► create_subject ──► because ──► it(..)* ──► tear_down
//!   (declare doubles)    (SubjectFactory)   (stimulus)  (observe)   (dispose)
//! ```

pub mod assertions;
pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use assertions::{Assertion, ShouldExt};
pub use domain_services::{
    Binding, BindingSource, DependencyRegistry, SubjectFactory, WiringReport,
};
pub use ports::registry::{
    BlueprintEntry, DOUBLE_BLUEPRINTS, list_blueprints, resolve_blueprint,
};
pub use use_cases::{
    Context, ContextReport, ContextSettings, Fixture, ObservationOutcome, Specification,
    StaticSpecification,
};
