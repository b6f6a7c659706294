//! Test-Double Factory Port
//!
//! The harness never creates doubles itself; it asks an injected
//! [`DoubleFactory`] for a mock, a stub or a partial mock of a capability.
//! Doubles come back type-erased as [`ErasedDouble`] so the dependency
//! registry can hold doubles of any capability in one ordered list.
//!
//! ```text
//! Context::dependency::<dyn Clock>()
//!          │
//!          ▼
//! DoubleFactory::create(DoubleRequest { capability, kind, args })
//!          │
//!          ▼
//! ErasedDouble { views: [(dyn Clock, Arc<dyn Clock>)], verifier }
//!          │
//!          ├──► DependencyRegistry (append)
//!          └──► view::<dyn Clock>() ──► Arc<dyn Clock> returned to the test
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::value_objects::{CapabilityId, DoubleKind, PartialArgs};

/// Something that can check its recorded expectations
pub trait Verifiable: Send + Sync {
    /// Fail with `Error::ExpectationViolation` when expectations were not met
    fn verify(&self) -> Result<()>;
}

/// Request for a new test double
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleRequest {
    /// Capability the double must fulfil
    pub capability: CapabilityId,
    /// Requested behavior
    pub kind: DoubleKind,
    /// Constructor arguments (partial mocks only)
    pub args: PartialArgs,
}

impl DoubleRequest {
    /// Request a verifying mock
    pub fn mock(capability: CapabilityId) -> Self {
        Self {
            capability,
            kind: DoubleKind::Mock,
            args: PartialArgs::new(),
        }
    }

    /// Request a default-behavior stub
    pub fn stub(capability: CapabilityId) -> Self {
        Self {
            capability,
            kind: DoubleKind::Stub,
            args: PartialArgs::new(),
        }
    }

    /// Request a partial mock seeded with constructor arguments
    pub fn partial(capability: CapabilityId, args: PartialArgs) -> Self {
        Self {
            capability,
            kind: DoubleKind::PartialMock,
            args,
        }
    }
}

/// Mocking collaborator port
///
/// Implementations know, per capability, how to build each kind of double.
pub trait DoubleFactory: Send + Sync {
    /// Create a double for the request
    ///
    /// Fails with `Error::UnknownCapability` when the capability is not known.
    fn create(&self, request: &DoubleRequest) -> Result<ErasedDouble>;

    /// Whether this factory can create doubles of `capability`
    fn supports(&self, capability: &CapabilityId) -> bool;

    /// Factory name for diagnostics
    fn factory_name(&self) -> &str;
}

type SharedView = Arc<dyn Any + Send + Sync>;

/// A test double with its capability type erased
///
/// Holds one shared handle per capability the double offers (the first one
/// is its primary capability). Cloning shares the same underlying double, so
/// identity is preserved between the registry, the test and the subject.
#[derive(Clone)]
pub struct ErasedDouble {
    kind: DoubleKind,
    views: Vec<(CapabilityId, SharedView)>,
    verifier: Option<Arc<dyn Verifiable>>,
    // Address of the primary handle's data
    identity: usize,
}

impl ErasedDouble {
    /// Erase `handle`, recording `C` as the primary capability
    pub fn new<C: ?Sized + Send + Sync + 'static>(kind: DoubleKind, handle: Arc<C>) -> Self {
        let identity = Arc::as_ptr(&handle).cast::<()>().addr();
        let view: SharedView = Arc::new(handle);
        Self {
            kind,
            views: vec![(CapabilityId::of::<C>(), view)],
            verifier: None,
            identity,
        }
    }

    /// Offer an additional capability view of the same double
    ///
    /// A view for a capability already offered is ignored; the first wins.
    pub fn with_view<D: ?Sized + Send + Sync + 'static>(mut self, handle: Arc<D>) -> Self {
        let capability = CapabilityId::of::<D>();
        if !self.satisfies(&capability) {
            let view: SharedView = Arc::new(handle);
            self.views.push((capability, view));
        }
        self
    }

    /// Attach the expectation verifier of this double
    pub fn with_verifier(mut self, verifier: Arc<dyn Verifiable>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Behavior kind this double was created with
    pub fn kind(&self) -> DoubleKind {
        self.kind
    }

    /// Primary capability
    pub fn primary(&self) -> CapabilityId {
        self.views[0].0
    }

    /// All capabilities this double can stand in for, primary first
    pub fn capabilities(&self) -> impl Iterator<Item = CapabilityId> + '_ {
        self.views.iter().map(|(capability, _)| *capability)
    }

    /// Whether this double can be bound where `capability` is required
    pub fn satisfies(&self, capability: &CapabilityId) -> bool {
        self.views.iter().any(|(offered, _)| offered == capability)
    }

    /// Typed handle for capability `C`, if offered
    pub fn view<C: ?Sized + 'static>(&self) -> Option<Arc<C>> {
        let capability = CapabilityId::of::<C>();
        self.views
            .iter()
            .find(|(offered, _)| *offered == capability)
            .and_then(|(_, view)| view.downcast_ref::<Arc<C>>())
            .cloned()
    }

    /// Whether `self` and `other` wrap the same underlying double
    ///
    /// Compares the primary handles' data, so doubles erased separately from
    /// one `Arc` are the same double.
    pub fn same_double(&self, other: &ErasedDouble) -> bool {
        self.identity == other.identity
    }

    /// Verify expectations; doubles without a verifier always pass
    pub fn verify(&self) -> Result<()> {
        match &self.verifier {
            Some(verifier) => verifier.verify(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ErasedDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedDouble")
            .field("kind", &self.kind)
            .field(
                "capabilities",
                &self.capabilities().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("verifying", &self.verifier.is_some())
            .finish()
    }
}
