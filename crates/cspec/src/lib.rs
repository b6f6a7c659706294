//! # Context Spec
//!
//! Context/specification test harness: each test context declares its
//! test doubles, gets its subject under test built by auto-wiring the
//! greediest constructor, applies one stimulus, and observes the outcome.
//!
//! ## Example
//!
//! ```ignore
//! use cspec::prelude::*;
//! use cspec::kata::StringCalculator;
//!
//! struct WhenAddingNothing {
//!     result: i64,
//! }
//!
//! impl Specification for WhenAddingNothing {
//!     type Subject = StringCalculator;
//!
//!     fn because(&mut self, ctx: &mut Context<StringCalculator>) -> Result<()> {
//!         self.result = ctx.sut()?.add("").map_err(|e| Error::Generic(e.into()))?;
//!         Ok(())
//!     }
//! }
//!
//! Harness::default().run(WhenAddingNothing { result: -1 }, |fixture| {
//!     fixture.it("should return 0", |spec, _| spec.result.should().be(0))
//! })?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, capabilities, double and subject ports
//! - `application` - registry, subject factory, context and fixture
//! - `providers` - call recorder and double factories
//! - `infrastructure` - configuration, logging, harness bootstrap

/// Domain layer - errors, capabilities and ports
pub mod domain {
    pub use cspec_domain::*;
}

/// Application layer - registry, wiring, context and lifecycle
pub mod application {
    pub use cspec_application::*;
}

/// Providers - test doubles and double factories
pub mod providers {
    pub use cspec_providers::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
pub mod infrastructure {
    pub use cspec_infrastructure::*;
}

pub mod kata;

pub use cspec_providers::register_double;

/// Everything a specification file usually needs
pub mod prelude {
    pub use cspec_application::{
        Context, ContextReport, Fixture, ShouldExt, Specification, StaticSpecification,
    };
    pub use cspec_domain::{
        BoxError, Constructor, DefaultDouble, Error, PartialArgs, Result, Subject,
    };
    pub use cspec_infrastructure::Harness;
    pub use cspec_providers::{
        Behavior, CatalogDoubleFactory, NullDoubleFactory, TestDouble, register_double,
    };
}
