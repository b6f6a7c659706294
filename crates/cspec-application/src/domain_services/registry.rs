//! Dependency Registry
//!
//! Ordered list of the test doubles a context declared. Append-only while
//! the context is being established, read while the subject is wired, and
//! discarded on tear-down. Duplicate capabilities are allowed: resolution
//! returns the first entry that can stand in for the requested capability.

use cspec_domain::error::{Error, Result};
use cspec_domain::ports::ErasedDouble;
use cspec_domain::value_objects::CapabilityId;
use tracing::debug;

/// Registry of declared test doubles
#[derive(Debug, Clone, Default)]
pub struct DependencyRegistry {
    entries: Vec<ErasedDouble>,
}

impl DependencyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a double, returning its position
    pub fn register(&mut self, double: ErasedDouble) -> usize {
        let index = self.entries.len();
        debug!(
            index,
            capability = double.primary().name(),
            kind = %double.kind(),
            "Registered dependency"
        );
        self.entries.push(double);
        index
    }

    /// First double able to stand in for `capability`, with its position
    pub fn resolve(&self, capability: &CapabilityId) -> Option<(usize, &ErasedDouble)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, double)| double.satisfies(capability))
    }

    /// Double at `index`
    pub fn get(&self, index: usize) -> Option<&ErasedDouble> {
        self.entries.get(index)
    }

    /// Number of registered doubles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered doubles in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ErasedDouble> {
        self.entries.iter()
    }

    /// Drop every registered double
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Verify the expectations of every registered double
    ///
    /// All doubles are checked; a single failure is returned as is, several
    /// are folded into one violation listing each of them.
    pub fn verify_all(&self) -> Result<()> {
        let mut failures: Vec<Error> = self
            .entries
            .iter()
            .filter_map(|double| double.verify().err())
            .collect();
        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            count => {
                let message = failures
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(Error::expectation(
                    format!("{count} registered doubles"),
                    message,
                ))
            }
        }
    }
}
