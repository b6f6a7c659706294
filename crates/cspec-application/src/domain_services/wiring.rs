//! Auto-Wiring Subject Factory
//!
//! Builds a subject under test from its declared constructors:
//!
//! 1. take every constructor from [`Subject::constructors`];
//! 2. keep the one with the greatest parameter count (ties follow the
//!    configured [`TieBreak`]);
//! 3. bind each parameter, in order, to the first registered double that
//!    offers the capability, else to a stub synthesized by the double
//!    factory, else (no blueprint) to the capability's
//!    [`DefaultDouble`](cspec_domain::ports::DefaultDouble);
//! 4. invoke the constructor.
//!
//! An unmatched parameter therefore never fails construction. Synthesized
//! stubs are never added to the registry; they are reachable only through
//! the subject. The factory keeps no state between calls, so
//! two calls build two independent subjects.

use std::any::type_name;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use cspec_domain::error::{Error, Result};
use cspec_domain::ports::{
    Constructor, DoubleFactory, DoubleRequest, ErasedDouble, Parameter, Subject,
};
use cspec_domain::value_objects::TieBreak;
use serde::Serialize;
use tracing::{debug, warn};

use super::registry::DependencyRegistry;

/// Where a constructor argument came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum BindingSource {
    /// A double declared by the context, at this registry position
    Registered {
        /// Registry position of the bound double
        index: usize,
    },
    /// A default stub created on the spot by the double factory
    Synthesized,
    /// The capability's `DefaultDouble`, used when the factory has no blueprint
    Fallback,
}

/// One bound constructor parameter
#[derive(Debug, Clone, Serialize)]
pub struct Binding {
    /// Capability name required by the parameter
    pub capability: &'static str,
    /// Where the argument came from
    #[serde(flatten)]
    pub source: BindingSource,
}

/// Record of how a subject was wired
#[derive(Debug, Clone, Serialize)]
pub struct WiringReport {
    /// Subject type name
    pub subject: &'static str,
    /// Name of the selected constructor
    pub constructor: &'static str,
    /// Number of declared constructors
    pub candidates: usize,
    /// Registry lookups performed
    pub lookups: usize,
    /// Parameter bindings in declaration order
    pub bindings: Vec<Binding>,
}

impl WiringReport {
    /// Parameters bound to registered doubles
    pub fn registered_count(&self) -> usize {
        self.bindings
            .iter()
            .filter(|b| matches!(b.source, BindingSource::Registered { .. }))
            .count()
    }

    /// Parameters bound to stand-ins (factory stubs or default doubles)
    pub fn synthesized_count(&self) -> usize {
        self.bindings
            .iter()
            .filter(|b| matches!(b.source, BindingSource::Synthesized | BindingSource::Fallback))
            .count()
    }

    /// Parameters bound to default doubles
    pub fn fallback_count(&self) -> usize {
        self.bindings
            .iter()
            .filter(|b| b.source == BindingSource::Fallback)
            .count()
    }
}

/// Builds subjects by wiring their greediest constructor
#[derive(Clone)]
pub struct SubjectFactory {
    doubles: Arc<dyn DoubleFactory>,
    tie_break: TieBreak,
}

impl SubjectFactory {
    /// Factory synthesizing missing dependencies through `doubles`
    pub fn new(doubles: Arc<dyn DoubleFactory>) -> Self {
        Self {
            doubles,
            tie_break: TieBreak::default(),
        }
    }

    /// Set the policy for constructors of equal maximum arity
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Current tie-break policy
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Double factory used for synthesized stubs
    pub fn doubles(&self) -> &Arc<dyn DoubleFactory> {
        &self.doubles
    }

    /// Build `S`, wiring its constructor from `registry`
    pub fn create<S: Subject>(&self, registry: &DependencyRegistry) -> Result<S> {
        self.create_with_report(registry).map(|(subject, _)| subject)
    }

    /// Build `S` and report how each parameter was bound
    pub fn create_with_report<S: Subject>(
        &self,
        registry: &DependencyRegistry,
    ) -> Result<(S, WiringReport)> {
        let subject = type_name::<S>();
        let constructors = S::constructors();
        let constructor = self.select(subject, &constructors)?;

        debug!(
            subject,
            constructor = constructor.name(),
            arity = constructor.arity(),
            candidates = constructors.len(),
            "Selected constructor"
        );

        let mut report = WiringReport {
            subject,
            constructor: constructor.name(),
            candidates: constructors.len(),
            lookups: 0,
            bindings: Vec::with_capacity(constructor.arity()),
        };
        let mut bound = Vec::with_capacity(constructor.arity());
        for parameter in constructor.params() {
            report.lookups += 1;
            let (double, source) = self.bind(registry, parameter)?;
            report.bindings.push(Binding {
                capability: parameter.capability().name(),
                source,
            });
            bound.push(double);
        }

        let instance = Self::invoke(subject, constructor, bound)?;
        Ok((instance, report))
    }

    /// Pick the constructor with the greatest arity
    pub fn select<'a, S: 'static>(
        &self,
        subject: &'static str,
        constructors: &'a [Constructor<S>],
    ) -> Result<&'a Constructor<S>> {
        let mut best: Option<&Constructor<S>> = None;
        let mut tied: Vec<&'static str> = Vec::new();
        for constructor in constructors {
            match best {
                Some(current) if constructor.arity() < current.arity() => {}
                Some(current) if constructor.arity() == current.arity() => {
                    tied.push(constructor.name());
                }
                _ => {
                    best = Some(constructor);
                    tied = vec![constructor.name()];
                }
            }
        }

        let selected = best.ok_or(Error::NoConstructor { subject })?;
        if tied.len() > 1 {
            match self.tie_break {
                TieBreak::FirstDeclared => {
                    debug!(subject, candidates = ?tied, "Equal-arity constructors, first declared wins");
                }
                TieBreak::Reject => {
                    return Err(Error::AmbiguousConstructor {
                        subject,
                        arity: selected.arity(),
                        candidates: tied,
                    });
                }
            }
        }
        Ok(selected)
    }

    fn bind(
        &self,
        registry: &DependencyRegistry,
        parameter: &Parameter,
    ) -> Result<(ErasedDouble, BindingSource)> {
        let capability = parameter.capability();
        if let Some((index, double)) = registry.resolve(&capability) {
            debug!(capability = capability.name(), index, "Bound registered dependency");
            return Ok((double.clone(), BindingSource::Registered { index }));
        }

        match self.doubles.create(&DoubleRequest::stub(capability)) {
            Ok(stub) => {
                debug!(
                    capability = capability.name(),
                    factory = self.doubles.factory_name(),
                    "Synthesized default stub"
                );
                Ok((stub, BindingSource::Synthesized))
            }
            Err(Error::UnknownCapability { .. }) => {
                debug!(
                    capability = capability.name(),
                    factory = self.doubles.factory_name(),
                    "No blueprint, bound default double"
                );
                Ok((parameter.fallback(), BindingSource::Fallback))
            }
            Err(error) => Err(error),
        }
    }

    fn invoke<S: 'static>(
        subject: &'static str,
        constructor: &Constructor<S>,
        bound: Vec<ErasedDouble>,
    ) -> Result<S> {
        let name = constructor.name();
        match catch_unwind(AssertUnwindSafe(|| constructor.invoke(bound))) {
            Ok(Ok(instance)) => Ok(instance),
            Ok(Err(error @ Error::Construction { .. })) => Err(error),
            Ok(Err(error)) => Err(Error::construction(subject, name, error)),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(subject, constructor = name, panic = %message, "Constructor panicked");
                Err(Error::construction_panic(subject, name, message))
            }
        }
    }
}

impl std::fmt::Debug for SubjectFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubjectFactory")
            .field("doubles", &self.doubles.factory_name())
            .field("tie_break", &self.tie_break)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
