//! Null double factory
//!
//! Knows no capability. Useful to prove that wiring a subject needed no
//! synthesized stub.

use cspec_domain::error::{Error, Result};
use cspec_domain::ports::{DoubleFactory, DoubleRequest, ErasedDouble};
use cspec_domain::value_objects::CapabilityId;

/// Double factory that rejects every request
///
/// # Example
///
/// ```rust
/// use cspec_providers::NullDoubleFactory;
///
/// let factory = NullDoubleFactory::new();
/// // Every create() fails with Error::UnknownCapability
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDoubleFactory;

impl NullDoubleFactory {
    /// Create a new null factory
    pub fn new() -> Self {
        Self
    }
}

impl DoubleFactory for NullDoubleFactory {
    fn create(&self, request: &DoubleRequest) -> Result<ErasedDouble> {
        Err(Error::unknown_capability(request.capability.name()))
    }

    fn supports(&self, _capability: &CapabilityId) -> bool {
        false
    }

    fn factory_name(&self) -> &str {
        "null"
    }
}
