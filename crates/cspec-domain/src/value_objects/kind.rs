//! Test-double kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Behavior kind requested when declaring a dependency
///
/// - `Mock`: records invocations; unmet expectations fail verification.
/// - `Stub`: default, always-succeeding behavior; never fails a test on its own.
/// - `PartialMock`: runs real logic unless a member is explicitly overridden,
///   optionally seeded with constructor arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleKind {
    /// Verifying test double
    Mock,
    /// Non-verifying test double with default behavior
    Stub,
    /// Real implementation with selectively overridden members
    PartialMock,
}

impl DoubleKind {
    /// Stable string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Stub => "stub",
            Self::PartialMock => "partial_mock",
        }
    }

    /// Whether doubles of this kind can fail verification
    pub fn verifies(&self) -> bool {
        !matches!(self, Self::Stub)
    }
}

impl fmt::Display for DoubleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoubleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "mock" => Ok(Self::Mock),
            "stub" => Ok(Self::Stub),
            "partial_mock" | "partial" => Ok(Self::PartialMock),
            other => Err(Error::invalid_argument(format!(
                "Unknown double kind '{other}'. Use mock, stub or partial_mock"
            ))),
        }
    }
}
