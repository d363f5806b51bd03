//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the cache backends.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Cache factory building configured handles |
//! | [`config`] | TOML configuration with environment overrides |
//! | [`constants`] | Centralized configuration constants |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use cache::{CacheFactory, CacheValue, SharedCache};
pub use config::{AppConfig, CacheConfig, CacheProviderKind, ConfigLoader, LoggingConfig};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
