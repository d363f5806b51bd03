//! Configuration management
//!
//! TOML file plus `CACHET_*` environment overrides, merged over defaults.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, CacheConfig, CacheProviderKind, LoggingConfig};
