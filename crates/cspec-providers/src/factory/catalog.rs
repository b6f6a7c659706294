//! Blueprint-driven double factory
//!
//! Looks a capability up in the runtime blueprints first, then in the
//! link-time [`DOUBLE_BLUEPRINTS`] slice.

use std::collections::HashMap;
use std::sync::Arc;

use cspec_application::ports::registry::{DOUBLE_BLUEPRINTS, resolve_blueprint};
use cspec_domain::error::{Error, Result};
use cspec_domain::ports::{DoubleFactory, DoubleRequest, ErasedDouble};
use cspec_domain::value_objects::CapabilityId;
use tracing::debug;

use crate::doubles::{TestDouble, erase};

type BlueprintFn = Arc<dyn Fn(&DoubleRequest) -> Result<ErasedDouble> + Send + Sync>;

struct RuntimeBlueprint {
    description: String,
    factory: BlueprintFn,
}

/// Double factory backed by capability blueprints
///
/// # Example
///
/// ```ignore
/// let mut doubles = CatalogDoubleFactory::with_linked();
/// doubles.register::<dyn Clock, ClockDouble>("fixed clock", |d| d);
/// let context = Context::<Scheduler>::new(Arc::new(doubles));
/// ```
pub struct CatalogDoubleFactory {
    runtime: HashMap<CapabilityId, RuntimeBlueprint>,
    linked: bool,
}

impl CatalogDoubleFactory {
    /// Factory knowing only runtime-registered blueprints
    pub fn new() -> Self {
        Self {
            runtime: HashMap::new(),
            linked: false,
        }
    }

    /// Factory that also consults the link-time blueprint slice
    pub fn with_linked() -> Self {
        Self {
            runtime: HashMap::new(),
            linked: true,
        }
    }

    /// Register double type `D` as the blueprint for `C`
    ///
    /// Replaces any runtime blueprint already registered for `C`.
    pub fn register<C, D>(&mut self, description: &str, upcast: fn(Arc<D>) -> Arc<C>) -> &mut Self
    where
        C: ?Sized + Send + Sync + 'static,
        D: TestDouble,
    {
        self.register_fn::<C, _>(description, move |request| erase::<C, D>(request, upcast))
    }

    /// Register a blueprint function for `C`
    pub fn register_fn<C, F>(&mut self, description: &str, factory: F) -> &mut Self
    where
        C: ?Sized + 'static,
        F: Fn(&DoubleRequest) -> Result<ErasedDouble> + Send + Sync + 'static,
    {
        let capability = CapabilityId::of::<C>();
        debug!(capability = capability.name(), description, "Registered runtime blueprint");
        self.runtime.insert(
            capability,
            RuntimeBlueprint {
                description: description.to_string(),
                factory: Arc::new(factory),
            },
        );
        self
    }

    /// Known blueprints as (capability, description), runtime first
    pub fn blueprints(&self) -> Vec<(String, String)> {
        let mut listed: Vec<(String, String)> = self
            .runtime
            .iter()
            .map(|(capability, blueprint)| {
                (capability.name().to_string(), blueprint.description.clone())
            })
            .collect();
        listed.sort();
        if self.linked {
            listed.extend(DOUBLE_BLUEPRINTS.iter().map(|entry| {
                (
                    (entry.capability)().name().to_string(),
                    entry.description.to_string(),
                )
            }));
        }
        listed
    }

    fn build(&self, request: &DoubleRequest) -> Result<ErasedDouble> {
        if let Some(blueprint) = self.runtime.get(&request.capability) {
            return (blueprint.factory)(request);
        }
        if self.linked
            && let Some(entry) = resolve_blueprint(&request.capability)
        {
            return (entry.factory)(request);
        }
        Err(Error::unknown_capability(request.capability.name()))
    }
}

impl Default for CatalogDoubleFactory {
    fn default() -> Self {
        Self::with_linked()
    }
}

impl DoubleFactory for CatalogDoubleFactory {
    fn create(&self, request: &DoubleRequest) -> Result<ErasedDouble> {
        let double = self.build(request)?;
        if !double.satisfies(&request.capability) {
            return Err(Error::CapabilityMismatch {
                expected: request.capability.name().to_string(),
                found: double.primary().name().to_string(),
            });
        }
        debug!(
            capability = request.capability.name(),
            kind = %request.kind,
            "Created test double"
        );
        Ok(double)
    }

    fn supports(&self, capability: &CapabilityId) -> bool {
        self.runtime.contains_key(capability)
            || (self.linked && resolve_blueprint(capability).is_some())
    }

    fn factory_name(&self) -> &str {
        "catalog"
    }
}

impl std::fmt::Debug for CatalogDoubleFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogDoubleFactory")
            .field("runtime", &self.runtime.len())
            .field("linked", &self.linked)
            .finish()
    }
}
