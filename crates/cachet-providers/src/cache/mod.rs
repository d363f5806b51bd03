//! Cache Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`InMemoryCache`] | Local | Moka store, values kept natively |
//! | [`MemcachedCache`] | Distributed | memcached cluster, values serialized |
//!
//! ## Provider Selection Guide
//!
//! - **Single Instance**: Use `InMemoryCache`; every operation is supported
//! - **Multi Instance**: Use `MemcachedCache`; `replace` and `flush` are unsupported

#[cfg(feature = "cache-memcached")]
pub mod memcached;
#[cfg(feature = "cache-memory")]
pub mod memory;

// Re-export for convenience
#[cfg(feature = "cache-memcached")]
pub use memcached::{MemcachedCache, MemcachedOptions};
#[cfg(feature = "cache-memory")]
pub use memory::InMemoryCache;
