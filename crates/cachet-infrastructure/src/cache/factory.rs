//! Cache factory
//!
//! Turns a [`CacheConfig`] or a provider kind plus an `open` string into a
//! shared, type-erased cache handle.

use crate::config::loader::validate_cache_config;
use crate::config::{CacheConfig, CacheProviderKind};
use cachet_domain::error::Result;
use cachet_domain::ports::{Cache, CacheBackend, OpenCache};
use cachet_providers::cache::memcached::MemcacheClient;
use cachet_providers::cache::{InMemoryCache, MemcachedCache, MemcachedOptions};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Shared cache handle for values of type `V`
pub type SharedCache<V> = Arc<dyn Cache<V>>;

/// Values any configured backend can hold
///
/// The in-memory backend needs `Clone`; the memcached backend needs serde.
pub trait CacheValue: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> CacheValue for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

/// Cache factory
pub struct CacheFactory;

impl CacheFactory {
    /// Create a cache from the configuration section
    pub fn create_from_config<V: CacheValue>(config: &CacheConfig) -> Result<SharedCache<V>> {
        validate_cache_config(config)?;

        let cache = match config.provider {
            CacheProviderKind::Memory => {
                Self::create_memory::<V>(config.default_expiration(), config.max_capacity)
            }
            CacheProviderKind::Memcached => {
                Self::create_memcached::<V>(&config.memcached_options())
            }
        };

        info!(
            provider = cache.provider_name(),
            default_expiration_secs = config.default_expiration_secs,
            "Cache created"
        );
        Ok(cache)
    }

    /// Open a cache of `kind` from its configuration string
    pub fn open<V: CacheValue>(kind: CacheProviderKind, config: &str) -> Result<SharedCache<V>> {
        let cache: SharedCache<V> = match kind {
            CacheProviderKind::Memory => Arc::new(InMemoryCache::<V>::open(config)?),
            CacheProviderKind::Memcached => Arc::new(MemcachedCache::<MemcacheClient>::open(config)?),
        };

        info!(provider = cache.provider_name(), "Cache opened");
        Ok(cache)
    }

    /// Create an in-memory cache
    pub fn create_memory<V: CacheValue>(
        default_expiration: Duration,
        max_capacity: Option<u64>,
    ) -> SharedCache<V> {
        match max_capacity {
            Some(capacity) => Arc::new(InMemoryCache::<V>::with_capacity(
                default_expiration,
                capacity,
            )),
            None => Arc::new(InMemoryCache::<V>::new(default_expiration)),
        }
    }

    /// Create a memcached cache; no connection is made until first use
    pub fn create_memcached<V: CacheValue>(options: &MemcachedOptions) -> SharedCache<V> {
        Arc::new(MemcachedCache::from_options(options))
    }
}
