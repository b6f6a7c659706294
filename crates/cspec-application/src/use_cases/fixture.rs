//! Specification Lifecycle
//!
//! A [`Specification`] supplies the hooks of one context; a [`Fixture`]
//! drives them. `set_up` runs `establish_context`, then
//! `create_subject_under_test`, then `because`, once and in that order.
//! Observations run afterwards through [`Fixture::it`], and `tear_down`
//! runs `dispose_context` once, whether or not set-up succeeded.

use std::any::type_name;

use cspec_domain::error::{Error, Result};
use cspec_domain::ports::Subject;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::context::Context;

/// Hooks of one behavioral context
///
/// Every hook has a default; a specification overrides only what it needs.
/// The default `create_subject_under_test` auto-wires the subject from the
/// doubles declared in `establish_context`.
pub trait Specification {
    /// Type under test
    type Subject: Subject;

    /// Human-readable context name used in logs and reports
    fn context_name(&self) -> &str {
        type_name::<Self>()
    }

    /// Declare doubles and any other preconditions
    fn establish_context(&mut self, context: &mut Context<Self::Subject>) -> Result<()> {
        let _ = context;
        Ok(())
    }

    /// Build the subject under test
    fn create_subject_under_test(
        &mut self,
        context: &mut Context<Self::Subject>,
    ) -> Result<Self::Subject> {
        context.build_subject()
    }

    /// Apply the stimulus being specified
    fn because(&mut self, context: &mut Context<Self::Subject>) -> Result<()> {
        let _ = context;
        Ok(())
    }

    /// Release resources acquired by the specification
    fn dispose_context(&mut self, context: &mut Context<Self::Subject>) -> Result<()> {
        let _ = context;
        Ok(())
    }
}

/// Specification of static behavior, with no subject under test
pub trait StaticSpecification: Specification<Subject = ()> {}

impl<T: Specification<Subject = ()>> StaticSpecification for T {}

/// Result of one observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationOutcome {
    /// Observation name
    pub name: String,
    /// Whether the observation held
    pub passed: bool,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Observations recorded for one context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContextReport {
    /// Context name
    pub context: String,
    /// Outcomes in execution order
    pub observations: Vec<ObservationOutcome>,
}

impl ContextReport {
    /// Number of observations that held
    pub fn passed(&self) -> usize {
        self.observations.iter().filter(|o| o.passed).count()
    }

    /// Number of observations that failed
    pub fn failed(&self) -> usize {
        self.observations.len() - self.passed()
    }

    /// True when every recorded observation held
    pub fn all_passed(&self) -> bool {
        self.observations.iter().all(|o| o.passed)
    }

    /// Outcome of the observation called `name`
    pub fn outcome(&self, name: &str) -> Option<&ObservationOutcome> {
        self.observations.iter().find(|o| o.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    SettingUp,
    Established,
    TornDown,
}

/// Runs a specification's lifecycle around its observations
///
/// Dropping a fixture that was set up but never torn down runs the
/// tear-down from `Drop`; failures there are logged.
pub struct Fixture<P: Specification> {
    spec: P,
    context: Context<P::Subject>,
    report: ContextReport,
    phase: Phase,
}

impl<P: Specification> Fixture<P> {
    /// Fixture for `spec` over `context`
    pub fn new(spec: P, context: Context<P::Subject>) -> Self {
        let report = ContextReport {
            context: spec.context_name().to_string(),
            observations: Vec::new(),
        };
        Self {
            spec,
            context,
            report,
            phase: Phase::Pending,
        }
    }

    /// Set up, run `body`, and always tear down
    ///
    /// The first failure wins: a set-up or body error is returned even when
    /// the tear-down also fails.
    pub fn run<F>(spec: P, context: Context<P::Subject>, body: F) -> Result<ContextReport>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut fixture = Self::new(spec, context);
        let outcome = fixture.set_up().and_then(|()| body(&mut fixture));
        let torn_down = fixture.tear_down();
        outcome?;
        torn_down?;
        Ok(fixture.take_report())
    }

    /// Run establish, create and because, once
    pub fn set_up(&mut self) -> Result<()> {
        if self.phase != Phase::Pending {
            return Err(Error::invalid_argument(format!(
                "set-up of '{}' already ran",
                self.report.context
            )));
        }
        self.phase = Phase::SettingUp;
        info!(context = %self.report.context, "Establishing context");

        self.spec
            .establish_context(&mut self.context)
            .map_err(|e| Error::set_up("establish_context", e))?;

        let subject = self
            .spec
            .create_subject_under_test(&mut self.context)
            .map_err(|e| Error::set_up("create_subject_under_test", e))?;
        self.context
            .set_subject(subject)
            .map_err(|e| Error::set_up("create_subject_under_test", e))?;

        self.spec
            .because(&mut self.context)
            .map_err(|e| Error::set_up("because", e))?;

        self.phase = Phase::Established;
        debug!(context = %self.report.context, "Context established");
        Ok(())
    }

    /// Run one named observation and record its outcome
    pub fn it<F>(&mut self, name: &str, observation: F) -> Result<()>
    where
        F: FnOnce(&P, &Context<P::Subject>) -> Result<()>,
    {
        if self.phase != Phase::Established {
            return Err(Error::SubjectNotCreated {
                message: format!("observation '{name}' ran outside an established context"),
            });
        }

        let outcome = observation(&self.spec, &self.context).map_err(|e| match e {
            Error::ObservationFailed { message, .. } => Error::observation(name, message),
            other => other,
        });
        let message = outcome.as_ref().err().map(ToString::to_string);
        debug!(context = %self.report.context, observation = name, passed = outcome.is_ok(), "Observation");
        self.report.observations.push(ObservationOutcome {
            name: name.to_string(),
            passed: outcome.is_ok(),
            message,
        });
        outcome
    }

    /// Run `dispose_context` and release the context
    ///
    /// Does nothing when set-up never started or tear-down already ran.
    pub fn tear_down(&mut self) -> Result<()> {
        if matches!(self.phase, Phase::Pending | Phase::TornDown) {
            return Ok(());
        }
        self.phase = Phase::TornDown;

        let disposed = self.spec.dispose_context(&mut self.context);
        let released = self.context.dispose();
        info!(context = %self.report.context, "Context disposed");

        match (disposed, released) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(e), _) => Err(Error::TearDown {
                message: format!("dispose_context of '{}' failed", self.report.context),
                source: Some(Box::new(e)),
            }),
            (Ok(()), Err(e)) => Err(Error::TearDown {
                message: format!("releasing '{}' failed", self.report.context),
                source: Some(Box::new(e)),
            }),
        }
    }

    /// Whether set-up completed
    pub fn is_established(&self) -> bool {
        self.phase == Phase::Established
    }

    /// Whether tear-down ran
    pub fn is_torn_down(&self) -> bool {
        self.phase == Phase::TornDown
    }

    /// The specification
    pub fn spec(&self) -> &P {
        &self.spec
    }

    /// The specification, mutably
    pub fn spec_mut(&mut self) -> &mut P {
        &mut self.spec
    }

    /// The context
    pub fn context(&self) -> &Context<P::Subject> {
        &self.context
    }

    /// The context, mutably
    pub fn context_mut(&mut self) -> &mut Context<P::Subject> {
        &mut self.context
    }

    /// Observations recorded so far
    pub fn report(&self) -> &ContextReport {
        &self.report
    }

    fn take_report(&mut self) -> ContextReport {
        std::mem::take(&mut self.report)
    }
}

impl<P: Specification> Drop for Fixture<P> {
    fn drop(&mut self) {
        if matches!(self.phase, Phase::SettingUp | Phase::Established) {
            debug!(context = %self.report.context, "Fixture dropped without tear-down");
            if let Err(e) = self.tear_down() {
                warn!(context = %self.report.context, error = %e, "Tear-down on drop failed");
            }
        }
    }
}

impl<P: Specification> std::fmt::Debug for Fixture<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fixture")
            .field("context", &self.report.context)
            .field("phase", &self.phase)
            .field("observations", &self.report.observations.len())
            .finish()
    }
}
