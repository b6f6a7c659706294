//! Test Context
//!
//! A [`Context`] owns everything one specification needs: the registry of
//! declared doubles, the subject under test once it has been built, and the
//! slot holding the last trapped error.
//!
//! ```text
//! dependency::<dyn Clock>()      ──► DoubleFactory (mock)    ──► registry[0]
//! dependency_as_stub::<dyn Log>() ─► DoubleFactory (stub)    ──► registry[1]
//! create_subject()               ──► SubjectFactory(registry) ──► sut
//! trap::<ParseError, _>(..)      ──► exception_caught
//! ```

use std::any::type_name;
use std::error::Error as StdError;
use std::sync::Arc;

use cspec_domain::error::{BoxError, Error, Result};
use cspec_domain::ports::{DoubleFactory, DoubleRequest, ErasedDouble, Subject};
use cspec_domain::value_objects::{CapabilityId, DoubleKind, PartialArgs, TieBreak};
use tracing::{debug, info};

use crate::domain_services::{DependencyRegistry, SubjectFactory, WiringReport};

/// Behavior switches for a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextSettings {
    /// Policy for constructors of equal maximum arity
    pub tie_break: TieBreak,
    /// Verify every registered double when the context is disposed
    pub verify_mocks_on_tear_down: bool,
    /// Log trapped errors
    pub log_trapped: bool,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::FirstDeclared,
            verify_mocks_on_tear_down: false,
            log_trapped: true,
        }
    }
}

/// State of one test context
pub struct Context<S> {
    registry: DependencyRegistry,
    doubles: Arc<dyn DoubleFactory>,
    factory: SubjectFactory,
    settings: ContextSettings,
    subject: Option<S>,
    wiring: Option<WiringReport>,
    exception_caught: Option<BoxError>,
}

impl<S: Subject> Context<S> {
    /// Context creating its doubles through `doubles`
    pub fn new(doubles: Arc<dyn DoubleFactory>) -> Self {
        Self::with_settings(doubles, ContextSettings::default())
    }

    /// Context with explicit settings
    pub fn with_settings(doubles: Arc<dyn DoubleFactory>, settings: ContextSettings) -> Self {
        let factory = SubjectFactory::new(doubles.clone()).with_tie_break(settings.tie_break);
        Self {
            registry: DependencyRegistry::new(),
            doubles,
            factory,
            settings,
            subject: None,
            wiring: None,
            exception_caught: None,
        }
    }

    // ========================================================================
    // Dependency declaration
    // ========================================================================

    /// Declare a verifying mock of `C` and return it for configuration
    ///
    /// A mock is a double we set expectations on; verification fails when
    /// they were not met.
    pub fn dependency<C>(&mut self) -> Result<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.declare(DoubleRequest::mock(CapabilityId::of::<C>()))
    }

    /// Declare a stub of `C`
    ///
    /// A stub only supplies default behavior; it never fails a test.
    pub fn dependency_as_stub<C>(&mut self) -> Result<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.declare(DoubleRequest::stub(CapabilityId::of::<C>()))
    }

    /// Declare a partial mock of `C`, seeded with constructor arguments
    pub fn dependency_as_partial<C>(&mut self, args: PartialArgs) -> Result<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.declare(DoubleRequest::partial(CapabilityId::of::<C>(), args))
    }

    /// Register a hand-written double for `C`
    pub fn register_instance<C>(&mut self, handle: Arc<C>) -> Arc<C>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.registry
            .register(ErasedDouble::new(DoubleKind::Stub, handle.clone()));
        handle
    }

    /// Register an already erased double, returning its registry position
    pub fn register(&mut self, double: ErasedDouble) -> usize {
        self.registry.register(double)
    }

    fn declare<C>(&mut self, request: DoubleRequest) -> Result<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let double = self.doubles.create(&request)?;
        let handle = double.view::<C>().ok_or_else(|| Error::CapabilityMismatch {
            expected: type_name::<C>().to_string(),
            found: double.primary().name().to_string(),
        })?;
        self.registry.register(double);
        Ok(handle)
    }

    /// First declared double offering a view of `C`
    ///
    /// Also reaches concrete double types when the factory registered them
    /// as additional views.
    pub fn resolve<C>(&self) -> Option<Arc<C>>
    where
        C: ?Sized + 'static,
    {
        self.registry
            .resolve(&CapabilityId::of::<C>())
            .and_then(|(_, double)| double.view::<C>())
    }

    /// Declared doubles
    pub fn registry(&self) -> &DependencyRegistry {
        &self.registry
    }

    /// Settings of this context
    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    // ========================================================================
    // Subject under test
    // ========================================================================

    /// Build a subject from the current registry without installing it
    ///
    /// The wiring report of the latest build replaces the previous one.
    pub fn build_subject(&mut self) -> Result<S> {
        let (subject, report) = self.factory.create_with_report::<S>(&self.registry)?;
        self.wiring = Some(report);
        Ok(subject)
    }

    /// Build the subject and keep it as this context's subject under test
    pub fn create_subject(&mut self) -> Result<&mut S> {
        self.ensure_no_subject()?;
        let subject = self.build_subject()?;
        Ok(self.subject.insert(subject))
    }

    /// Install a subject built elsewhere (custom `create_subject_under_test`)
    pub fn set_subject(&mut self, subject: S) -> Result<&mut S> {
        self.ensure_no_subject()?;
        Ok(self.subject.insert(subject))
    }

    fn ensure_no_subject(&self) -> Result<()> {
        if self.subject.is_some() {
            return Err(Error::SubjectAlreadyCreated {
                subject: type_name::<S>(),
            });
        }
        Ok(())
    }

    /// Whether the subject has been created
    pub fn has_subject(&self) -> bool {
        self.subject.is_some()
    }

    /// The subject under test
    pub fn sut(&self) -> Result<&S> {
        self.subject.as_ref().ok_or_else(|| Error::SubjectNotCreated {
            message: format!("{} accessed before set-up", type_name::<S>()),
        })
    }

    /// The subject under test, mutably
    pub fn sut_mut(&mut self) -> Result<&mut S> {
        self.subject.as_mut().ok_or_else(|| Error::SubjectNotCreated {
            message: format!("{} accessed before set-up", type_name::<S>()),
        })
    }

    /// How the latest subject built by this context was wired
    pub fn wiring(&self) -> Option<&WiringReport> {
        self.wiring.as_ref()
    }

    // ========================================================================
    // Error trapping
    // ========================================================================

    /// Run `action`, capturing an error of kind `K` instead of propagating it
    ///
    /// A captured error replaces any previously trapped one and yields
    /// `Ok(None)`. Errors of any other kind come back as
    /// `Error::Untrapped` carrying the original error.
    pub fn trap<K, T>(&mut self, action: impl FnOnce() -> std::result::Result<T, BoxError>) -> Result<Option<T>>
    where
        K: StdError + 'static,
    {
        let outcome = action();
        self.absorb::<K, T>(outcome)
    }

    /// [`Context::trap`] with mutable access to the subject under test
    pub fn trap_on_sut<K, T>(
        &mut self,
        action: impl FnOnce(&mut S) -> std::result::Result<T, BoxError>,
    ) -> Result<Option<T>>
    where
        K: StdError + 'static,
    {
        let outcome = action(self.sut_mut()?);
        self.absorb::<K, T>(outcome)
    }

    fn absorb<K, T>(&mut self, outcome: std::result::Result<T, BoxError>) -> Result<Option<T>>
    where
        K: StdError + 'static,
    {
        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.downcast_ref::<K>().is_some() => {
                if self.settings.log_trapped {
                    info!(kind = type_name::<K>(), error = %error, "Trapped error");
                }
                self.exception_caught = Some(error);
                Ok(None)
            }
            Err(error) => {
                debug!(expected = type_name::<K>(), error = %error, "Error kind not trapped");
                Err(Error::Untrapped { source: error })
            }
        }
    }

    /// Last trapped error
    pub fn exception_caught(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.exception_caught.as_deref()
    }

    /// Last trapped error, if it is of kind `K`
    pub fn exception_caught_as<K: StdError + 'static>(&self) -> Option<&K> {
        self.exception_caught
            .as_deref()
            .and_then(|error| error.downcast_ref::<K>())
    }

    /// Take the last trapped error out of the slot
    pub fn take_exception(&mut self) -> Option<BoxError> {
        self.exception_caught.take()
    }

    // ========================================================================
    // Verification and disposal
    // ========================================================================

    /// Verify the expectations of every declared double
    pub fn verify_all_expectations(&self) -> Result<()> {
        self.registry.verify_all()
    }

    /// Release the subject, the declared doubles and the trapped error
    ///
    /// Declared mocks are verified first when `verify_mocks_on_tear_down`
    /// is set; the context is released either way.
    pub fn dispose(&mut self) -> Result<()> {
        let verification = if self.settings.verify_mocks_on_tear_down {
            self.registry.verify_all()
        } else {
            Ok(())
        };
        self.subject = None;
        self.wiring = None;
        self.exception_caught = None;
        self.registry.clear();
        verification
    }
}

impl<S> std::fmt::Debug for Context<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("subject", &type_name::<S>())
            .field("created", &self.subject.is_some())
            .field("registry", &self.registry.len())
            .field("doubles", &self.doubles.factory_name())
            .field("settings", &self.settings)
            .finish()
    }
}
