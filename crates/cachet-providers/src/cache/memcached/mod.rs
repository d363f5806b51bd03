//! Memcached distributed cache provider
//!
//! Cache implementation backed by a memcached cluster. Values are serialized
//! before every write and decoded on every read; host selection, connection
//! pooling and the wire protocol belong to the `memcache` crate.
//!
//! ## Capability gaps
//!
//! `replace` and `flush` are not offered by this backend and always fail with
//! [`Error::Unsupported`]. Flushing a shared cluster is intentionally not
//! exposed.
//!
//! ## Example
//!
//! ```ignore
//! use cachet_domain::ports::OpenCache;
//! use cachet_providers::cache::MemcachedCache;
//!
//! let cache = MemcachedCache::open(r#"{"hosts": "10.0.0.1:11211, 10.0.0.2:11211"}"#)?;
//! ```

mod client;
mod errors;
mod getter;

pub use client::{MemcacheClient, MemcachedClient, counter_url, server_url};
pub use getter::ItemMapGetter;
pub use memcache::{CommandError, MemcacheError};

use crate::constants::{MEMCACHED_DEFAULT_POOL_SIZE, MEMCACHED_HOSTS_SEPARATOR};
use crate::serialization::{deserialize, serialize};
use cachet_domain::constants::MEMCACHED_PROVIDER_NAME;
use cachet_domain::error::{Error, Result};
use cachet_domain::ports::{Cache, CacheBackend, Getter, OpenCache};
use cachet_domain::value_objects::{Capabilities, Expiration, Operation};
use errors::{convert_counter_error, convert_memcache_error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

/// Operations offered by the memcached backend
pub const MEMCACHED_CAPABILITIES: Capabilities = Capabilities::all()
    .without(Operation::Replace)
    .without(Operation::Flush);

/// Connection options for [`MemcachedCache`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemcachedOptions {
    /// Server addresses (`host:port` or `memcache://` URLs)
    pub hosts: Vec<String>,
    /// Applied to [`Expiration::Default`] writes; zero means never expire
    pub default_expiration: Duration,
    /// Connections kept per server
    pub pool_size: u32,
    /// Socket read/write timeout
    pub timeout: Option<Duration>,
}

impl MemcachedOptions {
    /// Options for `hosts` with defaults for everything else
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
            default_expiration: Duration::ZERO,
            pool_size: MEMCACHED_DEFAULT_POOL_SIZE,
            timeout: None,
        }
    }

    /// Set the default expiration
    pub fn with_default_expiration(mut self, default_expiration: Duration) -> Self {
        self.default_expiration = default_expiration;
        self
    }

    /// Set the per-server pool size
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Set the socket timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// JSON accepted by [`MemcachedCache::open`]
#[derive(Debug, Deserialize)]
struct OpenConfig {
    hosts: Option<HostList>,
    default_expiration_secs: Option<u64>,
    pool_size: Option<u32>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HostList {
    Joined(String),
    List(Vec<String>),
}

impl HostList {
    /// Trimmed, non-empty host entries
    fn into_hosts(self) -> Vec<String> {
        let raw = match self {
            Self::Joined(joined) => joined
                .split(MEMCACHED_HOSTS_SEPARATOR)
                .map(str::to_string)
                .collect(),
            Self::List(list) => list,
        };
        raw.iter()
            .map(|host| host.trim())
            .filter(|host| !host.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Memcached cache
///
/// Generic over the client so the translation layer can run against any
/// [`MemcachedClient`]; the default is the lazily connected
/// [`MemcacheClient`]. One handle serves any serde-compatible value type.
pub struct MemcachedCache<C = MemcacheClient> {
    client: Arc<C>,
    default_expiration: Duration,
}

impl MemcachedCache<MemcacheClient> {
    /// Create a handle for `hosts` with default pool settings
    pub fn new<S: AsRef<str>>(hosts: &[S], default_expiration: Duration) -> Self {
        Self::with_client(
            MemcacheClient::new(hosts, MEMCACHED_DEFAULT_POOL_SIZE, None),
            default_expiration,
        )
    }

    /// Create a handle from full connection options
    pub fn from_options(options: &MemcachedOptions) -> Self {
        Self::with_client(
            MemcacheClient::new(&options.hosts, options.pool_size, options.timeout),
            options.default_expiration,
        )
    }

    /// Server URLs this handle talks to
    pub fn servers(&self) -> &[String] {
        self.client.urls()
    }
}

impl<C: MemcachedClient> MemcachedCache<C> {
    /// Wrap an existing client
    pub fn with_client(client: C, default_expiration: Duration) -> Self {
        Self {
            client: Arc::new(client),
            default_expiration,
        }
    }

    /// Default expiration applied to [`Expiration::Default`] writes
    pub fn default_expiration(&self) -> Duration {
        self.default_expiration
    }

    /// The wrapped client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resolve the expiration, serialize and hand the item to `store`
    fn invoke<V, F>(&self, key: &str, value: &V, expires: Expiration, store: F) -> Result<()>
    where
        V: Serialize,
        F: FnOnce(&C, &str, &[u8], u32) -> std::result::Result<(), MemcacheError>,
    {
        let expiration = expires.resolve_secs(self.default_expiration);
        let bytes = serialize(value)?;
        store(&self.client, key, &bytes, expiration).map_err(convert_memcache_error)
    }
}

/// Parse an `open` configuration string into connection options
///
/// Expects a JSON object with a `hosts` field: either one comma-separated
/// string or an array of strings.
pub fn parse_open_config(config: &str) -> Result<MemcachedOptions> {
    let parsed: OpenConfig = serde_json::from_str(config)
        .map_err(|e| Error::configuration_with_source("config invalid: malformed JSON", e))?;

    let hosts = parsed
        .hosts
        .ok_or_else(|| Error::configuration("config invalid: no hosts"))?
        .into_hosts();
    if hosts.is_empty() {
        return Err(Error::configuration("config invalid: hosts is empty"));
    }

    let mut options = MemcachedOptions::new(hosts);
    if let Some(secs) = parsed.default_expiration_secs {
        options = options.with_default_expiration(Duration::from_secs(secs));
    }
    if let Some(pool_size) = parsed.pool_size {
        if pool_size == 0 {
            return Err(Error::configuration("config invalid: pool_size must be > 0"));
        }
        options = options.with_pool_size(pool_size);
    }
    if let Some(ms) = parsed.timeout_ms {
        options = options.with_timeout(Duration::from_millis(ms));
    }
    Ok(options)
}

impl OpenCache for MemcachedCache<MemcacheClient> {
    fn open(config: &str) -> Result<Self> {
        let options = parse_open_config(config).inspect_err(|e| {
            error!(provider = MEMCACHED_PROVIDER_NAME, error = %e, "Failed to open cache");
        })?;
        Ok(Self::from_options(&options))
    }
}

impl<C> Clone for MemcachedCache<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            default_expiration: self.default_expiration,
        }
    }
}

impl<V, C> Getter<V> for MemcachedCache<C>
where
    V: DeserializeOwned,
    C: MemcachedClient,
{
    fn get(&self, key: &str) -> Result<V> {
        match self.client.get(key) {
            Ok(Some(bytes)) => deserialize(key, &bytes),
            Ok(None) => Err(Error::CacheMiss),
            Err(e) => Err(convert_memcache_error(e)),
        }
    }
}

impl<C: MemcachedClient> CacheBackend for MemcachedCache<C> {
    /// Removing an absent key is a `CacheMiss`
    fn delete(&self, key: &str) -> Result<()> {
        match self.client.delete(key) {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::CacheMiss),
            Err(e) => Err(convert_memcache_error(e)),
        }
    }

    fn increment(&self, key: &str, delta: u64) -> Result<u64> {
        self.client
            .increment(key, delta)
            .map_err(convert_counter_error)
    }

    fn decrement(&self, key: &str, delta: u64) -> Result<u64> {
        self.client
            .decrement(key, delta)
            .map_err(convert_counter_error)
    }

    fn flush(&self) -> Result<()> {
        let err = Error::unsupported(Operation::Flush, MEMCACHED_PROVIDER_NAME);
        warn!(provider = MEMCACHED_PROVIDER_NAME, "{err}");
        Err(err)
    }

    fn capabilities(&self) -> Capabilities {
        MEMCACHED_CAPABILITIES
    }

    fn provider_name(&self) -> &str {
        MEMCACHED_PROVIDER_NAME
    }
}

impl<V, C> Cache<V> for MemcachedCache<C>
where
    V: Serialize + DeserializeOwned + 'static,
    C: MemcachedClient,
{
    fn get_multi(&self, keys: &[&str]) -> Result<Box<dyn Getter<V>>> {
        let items = self
            .client
            .get_multi(keys)
            .map_err(convert_memcache_error)?;
        Ok(Box::new(ItemMapGetter::new(items)))
    }

    fn set(&self, key: &str, value: V, expires: Expiration) -> Result<()> {
        self.invoke(key, &value, expires, |client, key, bytes, exp| {
            client.set(key, bytes, exp)
        })
    }

    fn add(&self, key: &str, value: V, expires: Expiration) -> Result<()> {
        self.invoke(key, &value, expires, |client, key, bytes, exp| {
            client.add(key, bytes, exp)
        })
    }

    fn replace(&self, _key: &str, _value: V, _expires: Expiration) -> Result<()> {
        Err(Error::unsupported(
            Operation::Replace,
            MEMCACHED_PROVIDER_NAME,
        ))
    }
}

impl<C: fmt::Debug> fmt::Debug for MemcachedCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemcachedCache")
            .field("client", &self.client)
            .field("default_expiration", &self.default_expiration)
            .finish()
    }
}
