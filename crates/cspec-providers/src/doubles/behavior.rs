//! Call recording and expectations
//!
//! Every generated double owns a [`Behavior`]. Its capability methods
//! report each invocation through [`Behavior::respond`], which records the
//! call and resolves the configured return value:
//!
//! 1. the most recently declared matching expectation with a return value;
//! 2. a member override (partial mocks);
//! 3. a stubbed return value.
//!
//! When nothing is configured the double falls back to its default.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cspec_domain::error::{Error, Result};
use cspec_domain::ports::Verifiable;
use cspec_domain::value_objects::{CapabilityId, DoubleKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// One recorded invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    /// Member name
    pub member: String,
    /// Arguments, as JSON
    pub args: Value,
}

/// Expected call count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    /// Exactly this many calls
    Exactly(usize),
    /// This many calls or more
    AtLeast(usize),
    /// No call at all
    Never,
}

impl Times {
    fn admits(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
            Self::Never => count == 0,
        }
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n} call(s)"),
            Self::AtLeast(n) => write!(f, "at least {n} call(s)"),
            Self::Never => write!(f, "no call"),
        }
    }
}

#[derive(Debug, Clone)]
struct ExpectedCall {
    member: String,
    args: Option<Value>,
    times: Times,
    returns: Option<Value>,
}

impl ExpectedCall {
    fn matches(&self, member: &str, args: &Value) -> bool {
        self.member == member && self.args.as_ref().is_none_or(|expected| expected == args)
    }
}

#[derive(Debug, Default)]
struct BehaviorState {
    calls: Vec<Call>,
    expectations: Vec<ExpectedCall>,
    stubs: HashMap<String, Value>,
    overrides: HashMap<String, Value>,
}

/// Shared, thread-safe call recorder of one test double
///
/// Clones share state, so the double and the verifier registered with
/// the context observe the same calls.
#[derive(Clone)]
pub struct Behavior {
    capability: CapabilityId,
    kind: DoubleKind,
    state: Arc<Mutex<BehaviorState>>,
}

impl Behavior {
    /// Recorder for a double of `capability`
    pub fn new(capability: CapabilityId, kind: DoubleKind) -> Self {
        Self {
            capability,
            kind,
            state: Arc::new(Mutex::new(BehaviorState::default())),
        }
    }

    /// Capability of the owning double
    pub fn capability(&self) -> CapabilityId {
        self.capability
    }

    /// Kind of the owning double
    pub fn kind(&self) -> DoubleKind {
        self.kind
    }

    fn lock(&self) -> MutexGuard<'_, BehaviorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// Record an invocation of `member`
    pub fn record<A: Into<Value>>(&self, member: &str, args: A) {
        let call = Call {
            member: member.to_string(),
            args: args.into(),
        };
        debug!(capability = self.capability.name(), member, "Recorded call");
        self.lock().calls.push(call);
    }

    /// Every recorded call, in order
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Recorded calls of `member`
    pub fn calls_to(&self, member: &str) -> Vec<Call> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.member == member)
            .cloned()
            .collect()
    }

    /// Whether `member` was invoked at least once
    pub fn was_called(&self, member: &str) -> bool {
        self.lock().calls.iter().any(|call| call.member == member)
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Declare an expected call of `member`
    ///
    /// Defaults to "at least once, any arguments" until refined.
    pub fn expect(&self, member: &str) -> Expectation {
        let mut state = self.lock();
        state.expectations.push(ExpectedCall {
            member: member.to_string(),
            args: None,
            times: Times::AtLeast(1),
            returns: None,
        });
        Expectation {
            behavior: self.clone(),
            index: state.expectations.len() - 1,
        }
    }

    /// Return `value` from `member` without expecting the call
    pub fn stub_returns<V: Into<Value>>(&self, member: &str, value: V) {
        self.lock().stubs.insert(member.to_string(), value.into());
    }

    /// Replace the real logic of `member` with a canned return value
    pub fn override_member<V: Into<Value>>(&self, member: &str, value: V) {
        self.lock().overrides.insert(member.to_string(), value.into());
    }

    /// Restore the real logic of `member`
    pub fn clear_override(&self, member: &str) {
        self.lock().overrides.remove(member);
    }

    /// Whether `member` has been overridden
    pub fn is_overridden(&self, member: &str) -> bool {
        self.lock().overrides.contains_key(member)
    }

    // ========================================================================
    // Responding
    // ========================================================================

    /// Record the call and resolve the configured return value
    ///
    /// `Ok(None)` means nothing was configured for this call.
    pub fn respond<T: DeserializeOwned>(&self, member: &str, args: Value) -> Result<Option<T>> {
        let configured = {
            let mut state = self.lock();
            let configured = state
                .expectations
                .iter()
                .rev()
                .filter(|expected| expected.matches(member, &args))
                .find_map(|expected| expected.returns.clone())
                .or_else(|| state.overrides.get(member).cloned())
                .or_else(|| state.stubs.get(member).cloned());
            state.calls.push(Call {
                member: member.to_string(),
                args,
            });
            configured
        };

        configured
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    Error::invalid_argument(format!(
                        "configured return of {}::{member} has the wrong type: {e}",
                        self.capability.short_name()
                    ))
                })
            })
            .transpose()
    }

    /// [`Behavior::respond`], falling back to `T::default()`
    pub fn respond_or_default<T: DeserializeOwned + Default>(&self, member: &str, args: Value) -> T {
        self.respond_or_else(member, args, T::default)
    }

    /// [`Behavior::respond`], falling back to `fallback`
    ///
    /// A configured value of the wrong type is logged and ignored.
    pub fn respond_or_else<T, F>(&self, member: &str, args: Value, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.respond(member, args) {
            Ok(Some(value)) => value,
            Ok(None) => fallback(),
            Err(e) => {
                warn!(capability = self.capability.name(), member, error = %e, "Ignoring configured return");
                fallback()
            }
        }
    }

    // ========================================================================
    // Verification
    // ========================================================================

    /// Check every expectation against the recorded calls
    ///
    /// Stubs always pass.
    pub fn verify(&self) -> Result<()> {
        if !self.kind.verifies() {
            return Ok(());
        }
        let state = self.lock();
        let unmet: Vec<String> = state
            .expectations
            .iter()
            .filter_map(|expected| {
                let count = state
                    .calls
                    .iter()
                    .filter(|call| expected.matches(&call.member, &call.args))
                    .count();
                if expected.times.admits(count) {
                    return None;
                }
                let args = expected
                    .args
                    .as_ref()
                    .map_or_else(|| "any arguments".to_string(), ToString::to_string);
                Some(format!(
                    "{}({args}): expected {}, got {count}",
                    expected.member, expected.times
                ))
            })
            .collect();

        if unmet.is_empty() {
            Ok(())
        } else {
            Err(Error::expectation(self.capability.name(), unmet.join("; ")))
        }
    }
}

impl Verifiable for Behavior {
    fn verify(&self) -> Result<()> {
        Behavior::verify(self)
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Behavior")
            .field("capability", &self.capability.name())
            .field("kind", &self.kind)
            .field("calls", &state.calls.len())
            .field("expectations", &state.expectations.len())
            .finish()
    }
}

/// Builder refining one expected call
#[derive(Debug)]
pub struct Expectation {
    behavior: Behavior,
    index: usize,
}

// Configuration is applied immediately; the returned builder is optional
#[allow(clippy::return_self_not_must_use)]
impl Expectation {
    fn update(self, apply: impl FnOnce(&mut ExpectedCall)) -> Self {
        if let Some(expected) = self.behavior.lock().expectations.get_mut(self.index) {
            apply(expected);
        }
        self
    }

    /// Only count calls with exactly these arguments
    pub fn with_args<A: Into<Value>>(self, args: A) -> Self {
        let args = args.into();
        self.update(|expected| expected.args = Some(args))
    }

    /// Expect exactly `n` calls
    pub fn times(self, n: usize) -> Self {
        self.update(|expected| expected.times = Times::Exactly(n))
    }

    /// Expect exactly one call
    pub fn once(self) -> Self {
        self.times(1)
    }

    /// Expect one call or more
    pub fn at_least_once(self) -> Self {
        self.update(|expected| expected.times = Times::AtLeast(1))
    }

    /// Expect no call
    pub fn never(self) -> Self {
        self.update(|expected| expected.times = Times::Never)
    }

    /// Return `value` from matching calls
    pub fn returns<V: Into<Value>>(self, value: V) -> Self {
        let value = value.into();
        self.update(|expected| expected.returns = Some(value))
    }
}
