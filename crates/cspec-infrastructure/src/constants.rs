//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cspec.toml";

/// Project-local configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = ".cspec";

/// Configuration directory under the user config dir
pub const USER_CONFIG_DIR: &str = "cspec";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "CSPEC";

/// Separator between the prefix and nested keys (`CSPEC__LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "CSPEC_LOG";

// ============================================================================
// HARNESS DEFAULTS
// ============================================================================

/// Verify declared mocks when a context is disposed
pub const DEFAULT_VERIFY_MOCKS_ON_TEAR_DOWN: bool = false;

/// Log every trapped error
pub const DEFAULT_LOG_TRAPPED: bool = true;
