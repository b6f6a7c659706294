//! Calculator delegating arithmetic to an `Adder`
//!
//! The single constructor takes the `Adder` capability, so building a
//! `Calculator` from an empty context synthesizes an `AdderDouble` stub.
//! Without the linked blueprint the default double is an inert stub.

use std::sync::Arc;

use cspec_domain::{Constructor, DefaultDouble, PartialArgs, Result, Subject};
use cspec_providers::{Behavior, CapabilityId, DoubleKind, TestDouble, register_double};
use serde_json::json;

/// Adds two integers
pub trait Adder: Send + Sync {
    /// `a + b`
    fn add(&self, a: i64, b: i64) -> i64;
}

/// Adder doing integer addition, saturating at the `i64` bounds
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerAdder;

impl Adder for IntegerAdder {
    fn add(&self, a: i64, b: i64) -> i64 {
        a.saturating_add(b)
    }
}

/// Sums sequences through its adder
pub struct Calculator {
    adder: Arc<dyn Adder>,
}

impl Calculator {
    /// Calculator using `adder`
    pub fn new(adder: Arc<dyn Adder>) -> Self {
        Self { adder }
    }

    /// Fold `numbers` with the adder
    pub fn sum(&self, numbers: &[i64]) -> i64 {
        numbers.iter().fold(0, |acc, n| self.adder.add(acc, *n))
    }

    /// The adder in use
    pub fn adder(&self) -> &Arc<dyn Adder> {
        &self.adder
    }
}

impl Subject for Calculator {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::unary("new", |adder: Arc<dyn Adder>| {
            Ok(Calculator::new(adder))
        })]
    }
}

/// Test double for [`Adder`]
///
/// Mocks and stubs answer with configured values, else 0. Partial mocks
/// add for real unless `add` is overridden.
pub struct AdderDouble {
    behavior: Behavior,
}

impl TestDouble for AdderDouble {
    fn create(behavior: Behavior, _args: &PartialArgs) -> Result<Self> {
        Ok(Self { behavior })
    }

    fn behavior(&self) -> &Behavior {
        &self.behavior
    }
}

impl Adder for AdderDouble {
    fn add(&self, a: i64, b: i64) -> i64 {
        let args = json!([a, b]);
        if self.behavior.kind() == DoubleKind::PartialMock {
            self.behavior.respond_or_else("add", args, || IntegerAdder.add(a, b))
        } else {
            self.behavior.respond_or_default("add", args)
        }
    }
}

impl DefaultDouble for dyn Adder {
    fn default_double() -> Arc<Self> {
        Arc::new(AdderDouble {
            behavior: Behavior::new(CapabilityId::of::<dyn Adder>(), DoubleKind::Stub),
        })
    }
}

register_double!(ADDER_DOUBLE: dyn Adder => AdderDouble, "Adder answering configured sums");
