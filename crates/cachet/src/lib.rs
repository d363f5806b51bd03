//! # cachet
//!
//! One cache contract, several storage engines. Application code talks to the
//! [`Cache`] / [`CacheBackend`] traits and stays agnostic of whether values
//! live in the process (Moka) or on a memcached cluster.
//!
//! ## Example
//!
//! ```ignore
//! use cachet::{Cache, CacheBackend, Getter, OpenCache, DEFAULT};
//! use cachet::providers::cache::MemcachedCache;
//!
//! let cache: MemcachedCache = MemcachedCache::open(r#"{"hosts": "127.0.0.1:11211"}"#)?;
//! cache.set("greeting", "hello".to_string(), DEFAULT)?;
//! let greeting: String = cache.get("greeting")?;
//! ```
//!
//! ## Crates
//!
//! - `domain` - cache contract, expiration sentinels, error vocabulary
//! - `providers` - in-memory and memcached backends
//! - `infrastructure` - configuration, logging, cache factory

pub mod cli;

/// Domain layer - cache contract and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use cachet_domain::*;
}

/// Provider layer - backend implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use cachet_providers::*;
}

/// Infrastructure layer - config, logging and factory
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use cachet_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export backends and wiring for convenience
pub use infrastructure::{CacheFactory, SharedCache};
pub use providers::cache::{InMemoryCache, MemcachedCache};
