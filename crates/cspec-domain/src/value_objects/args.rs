//! Partial-mock constructor arguments
//!
//! Partial mocks run real logic, so their blueprint may need constructor
//! arguments. Arguments travel as JSON values to keep the factory port
//! object-safe; blueprints read them back with [`PartialArgs::get`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Ordered constructor arguments for a partial mock
///
/// # Example
///
/// ```
/// use cspec_domain::PartialArgs;
///
/// let args = PartialArgs::new().with(10).with("ten");
/// let base: i64 = args.get(0).unwrap();
/// let label: String = args.get(1).unwrap();
/// assert_eq!(base, 10);
/// assert_eq!(label, "ten");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialArgs(Vec<Value>);

impl PartialArgs {
    /// Empty argument list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument
    pub fn with<V: Into<Value>>(mut self, value: V) -> Self {
        self.0.push(value.into());
        self
    }

    /// Append any serializable argument
    pub fn with_serialized<T: Serialize>(mut self, value: &T) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(|e| {
            Error::invalid_argument(format!("Partial mock argument is not serializable: {e}"))
        })?;
        self.0.push(value);
        Ok(self)
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no argument was supplied
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw argument at `index`
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Deserialize the argument at `index`
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T> {
        let value = self.0.get(index).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Partial mock argument #{index} missing ({} supplied)",
                self.0.len()
            ))
        })?;
        serde_json::from_value(value.clone()).map_err(|e| {
            Error::invalid_argument(format!("Partial mock argument #{index} is malformed: {e}"))
        })
    }

    /// Deserialize the argument at `index`, or fall back when it was not supplied
    pub fn get_or<T: DeserializeOwned>(&self, index: usize, default: T) -> Result<T> {
        if index < self.0.len() {
            self.get(index)
        } else {
            Ok(default)
        }
    }
}

impl From<Vec<Value>> for PartialArgs {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}
