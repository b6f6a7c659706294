//! Use cases: the per-specification context and its lifecycle fixture

pub mod context;
pub mod fixture;

pub use context::{Context, ContextSettings};
pub use fixture::{ContextReport, Fixture, ObservationOutcome, Specification, StaticSpecification};
