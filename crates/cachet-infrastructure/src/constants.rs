//! Infrastructure layer constants
//!
//! Provider identifiers live in `cachet_domain::constants`; memcached
//! connection defaults live in `cachet_providers::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cachet.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "cachet";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "CACHET";

/// Separator between nested keys in environment variables (`CACHET_CACHE__PROVIDER`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "CACHET_LOG";

/// File name prefix for rolling log files
pub const LOG_FILE_PREFIX: &str = "cachet";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default expiration in seconds (0 = entries never expire)
pub const CACHE_DEFAULT_EXPIRATION_SECS: u64 = 0;
