//! Configuration types

use crate::constants::{CACHE_DEFAULT_EXPIRATION_SECS, DEFAULT_LOG_LEVEL};
use cachet_domain::constants::{IN_MEMORY_PROVIDER_NAME, MEMCACHED_PROVIDER_NAME};
use cachet_domain::error::{Error, Result};
use cachet_providers::cache::MemcachedOptions;
use cachet_providers::constants::MEMCACHED_DEFAULT_POOL_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Cache configuration
    pub cache: CacheConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Cache backends
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CacheProviderKind {
    /// Process-local cache (Moka)
    #[default]
    #[serde(alias = "inmemory", alias = "moka")]
    Memory,
    /// Memcached cluster
    #[serde(alias = "memcache")]
    Memcached,
}

impl CacheProviderKind {
    /// Provider name as reported by `CacheBackend::provider_name`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => IN_MEMORY_PROVIDER_NAME,
            Self::Memcached => MEMCACHED_PROVIDER_NAME,
        }
    }
}

impl fmt::Display for CacheProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "inmemory" | "moka" => Ok(Self::Memory),
            "memcached" | "memcache" => Ok(Self::Memcached),
            other => Err(Error::configuration(format!(
                "Unknown cache provider: {other}. Use memory or memcached"
            ))),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache backend
    pub provider: CacheProviderKind,

    /// Expiration applied to `Expiration::Default` writes, in seconds (0 = never)
    pub default_expiration_secs: u64,

    /// Entry bound for the in-memory backend
    pub max_capacity: Option<u64>,

    /// Memcached servers (`host:port` or `memcache://` URLs)
    pub hosts: Vec<String>,

    /// Memcached connections kept per server
    pub pool_size: u32,

    /// Memcached socket timeout in milliseconds
    pub timeout_ms: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: CacheProviderKind::Memory,
            default_expiration_secs: CACHE_DEFAULT_EXPIRATION_SECS,
            max_capacity: None,
            hosts: Vec::new(),
            pool_size: MEMCACHED_DEFAULT_POOL_SIZE,
            timeout_ms: None,
        }
    }
}

impl CacheConfig {
    /// Default expiration as a duration
    pub fn default_expiration(&self) -> Duration {
        Duration::from_secs(self.default_expiration_secs)
    }

    /// Host entries with surrounding whitespace removed and blanks dropped
    pub fn trimmed_hosts(&self) -> Vec<String> {
        self.hosts
            .iter()
            .map(|host| host.trim())
            .filter(|host| !host.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Connection options for the memcached backend
    pub fn memcached_options(&self) -> MemcachedOptions {
        let mut options = MemcachedOptions::new(self.trimmed_hosts())
            .with_default_expiration(self.default_expiration())
            .with_pool_size(self.pool_size);
        if let Some(ms) = self.timeout_ms {
            options = options.with_timeout(Duration::from_millis(ms));
        }
        options
    }
}
