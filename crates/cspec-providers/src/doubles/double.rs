//! Hand-written doubles backed by a [`Behavior`]

use std::sync::Arc;

use cspec_domain::error::Result;
use cspec_domain::ports::{DoubleRequest, ErasedDouble};
use cspec_domain::value_objects::PartialArgs;

use super::behavior::Behavior;

/// A concrete double type implementing one capability
///
/// The same type serves as mock, stub and partial mock; the kind only
/// changes how its [`Behavior`] verifies. Partial mocks receive their
/// constructor arguments through `args`.
pub trait TestDouble: Send + Sync + Sized + 'static {
    /// Build the double around its call recorder
    fn create(behavior: Behavior, args: &PartialArgs) -> Result<Self>;

    /// Call recorder of this double
    fn behavior(&self) -> &Behavior;
}

/// Create a `D` for `request` and erase it as capability `C`
///
/// The erased double also offers `D` itself as a view, so a test can reach
/// the concrete double (and its behavior) through the registry.
pub fn erase<C, D>(request: &DoubleRequest, upcast: fn(Arc<D>) -> Arc<C>) -> Result<ErasedDouble>
where
    C: ?Sized + Send + Sync + 'static,
    D: TestDouble,
{
    let behavior = Behavior::new(request.capability, request.kind);
    let double = Arc::new(D::create(behavior.clone(), &request.args)?);
    Ok(ErasedDouble::new(request.kind, upcast(Arc::clone(&double)))
        .with_view(double)
        .with_verifier(Arc::new(behavior)))
}
