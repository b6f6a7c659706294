//! Fluent assertions for observations
//!
//! `value.should().be(expected)` returns `Error::ObservationFailed`
//! instead of panicking, so a failed observation is recorded by the
//! fixture and the remaining observations still run.
//!
//! ```
//! use cspec_application::ShouldExt;
//!
//! assert!(3.should().be(3).is_ok());
//! assert!(Some(1).should().be_none().is_err());
//! ```

use std::fmt::Debug;

use cspec_domain::error::{Error, Result};

/// Entry point for fluent assertions, implemented for every type
pub trait ShouldExt {
    /// Start an assertion about `self`
    fn should(&self) -> Assertion<'_, Self> {
        Assertion {
            actual: self,
            label: None,
        }
    }
}

impl<T: ?Sized> ShouldExt for T {}

/// Pending assertion about a borrowed value
#[derive(Debug)]
pub struct Assertion<'a, T: ?Sized> {
    actual: &'a T,
    label: Option<String>,
}

impl<T: ?Sized + Debug> Assertion<'_, T> {
    /// Name the observation reported on failure
    #[must_use]
    pub fn described_as<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Hold when `predicate` accepts the value
    pub fn satisfy<F>(self, description: &str, predicate: F) -> Result<()>
    where
        F: FnOnce(&T) -> bool,
    {
        if predicate(self.actual) {
            Ok(())
        } else {
            Err(self.fail(format!("expected {description}, got {:?}", self.actual)))
        }
    }

    fn fail(&self, message: String) -> Error {
        Error::observation(self.label.as_deref().unwrap_or("should"), message)
    }
}

impl<T: PartialEq + Debug> Assertion<'_, T> {
    /// Hold when the value equals `expected`
    pub fn be(self, expected: T) -> Result<()> {
        if *self.actual == expected {
            Ok(())
        } else {
            Err(self.fail(format!("expected {expected:?}, got {:?}", self.actual)))
        }
    }

    /// Hold when the value differs from `unexpected`
    pub fn not_be(self, unexpected: T) -> Result<()> {
        if *self.actual == unexpected {
            Err(self.fail(format!("expected anything but {unexpected:?}")))
        } else {
            Ok(())
        }
    }
}

impl<V: Debug> Assertion<'_, Option<V>> {
    /// Hold when the option is `Some`
    pub fn be_some(self) -> Result<()> {
        match self.actual {
            Some(_) => Ok(()),
            None => Err(self.fail("expected Some(_), got None".to_string())),
        }
    }

    /// Hold when the option is `None`
    pub fn be_none(self) -> Result<()> {
        match self.actual {
            None => Ok(()),
            Some(value) => Err(self.fail(format!("expected None, got Some({value:?})"))),
        }
    }
}

impl Assertion<'_, bool> {
    /// Hold when the value is `true`
    pub fn be_true(self) -> Result<()> {
        self.be(true)
    }

    /// Hold when the value is `false`
    pub fn be_false(self) -> Result<()> {
        self.be(false)
    }
}
