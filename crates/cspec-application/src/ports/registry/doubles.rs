//! Test-Double Blueprint Registry
//!
//! Blueprints register themselves into [`DOUBLE_BLUEPRINTS`] with
//! `#[linkme::distributed_slice]` and are discovered by capability.

use cspec_domain::error::Result;
use cspec_domain::ports::{DoubleRequest, ErasedDouble};
use cspec_domain::value_objects::CapabilityId;

/// Registry entry for one capability's test doubles
///
/// ```ignore
/// #[linkme::distributed_slice(DOUBLE_BLUEPRINTS)]
/// static CLOCK_DOUBLES: BlueprintEntry = BlueprintEntry {
///     capability: || CapabilityId::of::<dyn Clock>(),
///     description: "Clock returning a fixed instant",
///     factory: |request| Ok(ErasedDouble::new(request.kind, Arc::new(FixedClock) as Arc<dyn Clock>)),
/// };
/// ```
pub struct BlueprintEntry {
    /// Capability this blueprint fulfils
    pub capability: fn() -> CapabilityId,
    /// Human-readable description
    pub description: &'static str,
    /// Creates a double of the requested kind
    pub factory: fn(&DoubleRequest) -> Result<ErasedDouble>,
}

// Blueprints submit entries at compile time
#[linkme::distributed_slice]
pub static DOUBLE_BLUEPRINTS: [BlueprintEntry] = [..];

/// Find the first blueprint registered for `capability`
pub fn resolve_blueprint(capability: &CapabilityId) -> Option<&'static BlueprintEntry> {
    DOUBLE_BLUEPRINTS
        .iter()
        .find(|entry| (entry.capability)() == *capability)
}

/// List all registered blueprints as (capability name, description)
pub fn list_blueprints() -> Vec<(&'static str, &'static str)> {
    DOUBLE_BLUEPRINTS
        .iter()
        .map(|entry| ((entry.capability)().name(), entry.description))
        .collect()
}
