//! Configuration types
//!
//! ```toml
//! [logging]
//! level = "debug"
//! json_format = false
//!
//! [factory]
//! tie_break = "reject"
//! verify_mocks_on_tear_down = true
//!
//! [trap]
//! log_trapped = true
//! ```

use cspec_application::ContextSettings;
use cspec_domain::value_objects::TieBreak;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON output format
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}

/// Subject factory and double configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Policy for constructors of equal maximum arity
    pub tie_break: TieBreak,
    /// Verify declared mocks when a context is disposed
    pub verify_mocks_on_tear_down: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            verify_mocks_on_tear_down: DEFAULT_VERIFY_MOCKS_ON_TEAR_DOWN,
        }
    }
}

/// Error trapping configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrapConfig {
    /// Log every trapped error
    pub log_trapped: bool,
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self {
            log_trapped: DEFAULT_LOG_TRAPPED,
        }
    }
}

/// Harness configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Subject factory configuration
    pub factory: FactoryConfig,
    /// Error trapping configuration
    pub trap: TrapConfig,
}

impl HarnessConfig {
    /// Settings applied to every context created from this configuration
    pub fn context_settings(&self) -> ContextSettings {
        ContextSettings {
            tie_break: self.factory.tie_break,
            verify_mocks_on_tear_down: self.factory.verify_mocks_on_tear_down,
            log_trapped: self.trap.log_trapped,
        }
    }
}
