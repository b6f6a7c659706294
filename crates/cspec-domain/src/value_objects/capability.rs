//! Capability identity
//!
//! A capability is the interface a test double fulfils, typically a
//! `dyn Trait` type. Identity is the [`TypeId`]; the type name is kept
//! for diagnostics only.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a capability (interface or concrete type) a double can fulfil
///
/// # Example
///
/// ```
/// use cspec_domain::CapabilityId;
///
/// trait Clock {}
///
/// let clock = CapabilityId::of::<dyn Clock>();
/// assert_eq!(clock, CapabilityId::of::<dyn Clock>());
/// assert!(clock.name().contains("Clock"));
/// ```
#[derive(Clone, Copy)]
pub struct CapabilityId {
    type_id: TypeId,
    name: &'static str,
}

impl CapabilityId {
    /// Capability identity of `C`
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    /// Underlying type identity
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name, for diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without module path (`dyn my_crate::ports::Clock` -> `dyn Clock`)
    pub fn short_name(&self) -> String {
        let (prefix, path) = match self.name.strip_prefix("dyn ") {
            Some(rest) => ("dyn ", rest),
            None => ("", self.name),
        };
        let base = path.split('<').next().unwrap_or(path);
        let short = base.rsplit("::").next().unwrap_or(base);
        format!("{prefix}{short}{}", &path[base.len()..])
    }
}

impl PartialEq for CapabilityId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CapabilityId {}

impl Hash for CapabilityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilityId").field(&self.name).finish()
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
