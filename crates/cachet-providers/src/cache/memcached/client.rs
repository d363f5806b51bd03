//! Memcached client seam
//!
//! [`MemcachedClient`] is the narrow slice of a memcached client the adapter
//! needs. [`MemcacheClient`] implements it over the `memcache` crate and
//! connects on first use, so building a handle never touches the network.
//!
//! Counters go through a second pool speaking the text protocol. Binary
//! `incr`/`decr` as sent by `memcache` always carry an initial value, which
//! makes the server create a missing key instead of reporting it.

use crate::constants::{
    MEMCACHED_ASCII_PROTOCOL_QUERY, MEMCACHED_DEFAULT_PORT, MEMCACHED_URL_SCHEME,
};
use memcache::MemcacheError;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Byte-level memcached operations
///
/// Errors are the `memcache` crate's own; translation to the shared
/// vocabulary happens in the adapter.
pub trait MemcachedClient: Send + Sync + fmt::Debug {
    /// Fetch one item, `None` when absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, MemcacheError>;

    /// Fetch several items in one request; absent keys are left out
    fn get_multi(&self, keys: &[&str]) -> Result<HashMap<String, Vec<u8>>, MemcacheError>;

    /// Store unconditionally
    fn set(&self, key: &str, value: &[u8], expiration: u32) -> Result<(), MemcacheError>;

    /// Store only if absent
    fn add(&self, key: &str, value: &[u8], expiration: u32) -> Result<(), MemcacheError>;

    /// Remove an item, `false` when it did not exist
    fn delete(&self, key: &str) -> Result<bool, MemcacheError>;

    /// Server-side `incr`; a missing key is `KeyNotFound`
    fn increment(&self, key: &str, delta: u64) -> Result<u64, MemcacheError>;

    /// Server-side `decr`; a missing key is `KeyNotFound`
    fn decrement(&self, key: &str, delta: u64) -> Result<u64, MemcacheError>;
}

/// Lazily connected `memcache::Client` pair
///
/// Items travel over the binary protocol, counters over the text protocol.
/// Both pools hash keys over the same server list, so a counter is always
/// updated on the server that holds it.
pub struct MemcacheClient {
    urls: Vec<String>,
    counter_urls: Vec<String>,
    pool_size: u32,
    items: OnceCell<memcache::Client>,
    counters: OnceCell<memcache::Client>,
}

impl MemcacheClient {
    /// Prepare a client for `hosts` without connecting
    ///
    /// Hosts may be bare `host:port` pairs or full `memcache://` URLs. A
    /// timeout is applied to connecting, reading and writing.
    pub fn new<S: AsRef<str>>(hosts: &[S], pool_size: u32, timeout: Option<Duration>) -> Self {
        let urls: Vec<String> = hosts
            .iter()
            .map(|h| with_timeout(server_url(h.as_ref()), timeout))
            .collect();
        let counter_urls = urls.iter().map(|url| counter_url(url)).collect();

        Self {
            urls,
            counter_urls,
            pool_size,
            items: OnceCell::new(),
            counters: OnceCell::new(),
        }
    }

    /// Server URLs used for items
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Server URLs used for counters
    pub fn counter_urls(&self) -> &[String] {
        &self.counter_urls
    }

    /// Whether any connection has been established yet
    pub fn is_connected(&self) -> bool {
        self.items.get().is_some() || self.counters.get().is_some()
    }

    fn items(&self) -> Result<&memcache::Client, MemcacheError> {
        self.items
            .get_or_try_init(|| connect(&self.urls, self.pool_size))
    }

    fn counters(&self) -> Result<&memcache::Client, MemcacheError> {
        self.counters
            .get_or_try_init(|| connect(&self.counter_urls, self.pool_size))
    }
}

fn connect(urls: &[String], pool_size: u32) -> Result<memcache::Client, MemcacheError> {
    debug!(servers = ?urls, pool_size, "Connecting to memcached");
    memcache::Client::with_pool_size(urls.to_vec(), pool_size)
}

impl MemcachedClient for MemcacheClient {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, MemcacheError> {
        self.items()?.get(key)
    }

    fn get_multi(&self, keys: &[&str]) -> Result<HashMap<String, Vec<u8>>, MemcacheError> {
        self.items()?.gets(keys)
    }

    fn set(&self, key: &str, value: &[u8], expiration: u32) -> Result<(), MemcacheError> {
        self.items()?.set(key, value, expiration)
    }

    fn add(&self, key: &str, value: &[u8], expiration: u32) -> Result<(), MemcacheError> {
        self.items()?.add(key, value, expiration)
    }

    fn delete(&self, key: &str) -> Result<bool, MemcacheError> {
        self.items()?.delete(key)
    }

    fn increment(&self, key: &str, delta: u64) -> Result<u64, MemcacheError> {
        self.counters()?.increment(key, delta)
    }

    fn decrement(&self, key: &str, delta: u64) -> Result<u64, MemcacheError> {
        self.counters()?.decrement(key, delta)
    }
}

impl fmt::Debug for MemcacheClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemcacheClient")
            .field("urls", &self.urls)
            .field("counter_urls", &self.counter_urls)
            .field("pool_size", &self.pool_size)
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Turn a configured host into a memcache URL
///
/// Bare hosts get the `memcache://` scheme and, when missing, the default
/// memcached port.
pub fn server_url(host: &str) -> String {
    if host.contains("://") {
        host.to_string()
    } else if host.contains(':') {
        format!("{MEMCACHED_URL_SCHEME}{host}")
    } else {
        format!("{MEMCACHED_URL_SCHEME}{host}:{MEMCACHED_DEFAULT_PORT}")
    }
}

/// Text-protocol twin of an item URL
///
/// A URL that already selects a protocol is kept as is.
pub fn counter_url(url: &str) -> String {
    if url.contains("protocol=") {
        url.to_string()
    } else {
        append_query(url, MEMCACHED_ASCII_PROTOCOL_QUERY)
    }
}

fn with_timeout(url: String, timeout: Option<Duration>) -> String {
    match timeout {
        Some(timeout) if !url.contains("timeout=") => {
            let secs = timeout.as_secs_f64();
            append_query(&url, &format!("timeout={secs}&connect_timeout={secs}"))
        }
        _ => url,
    }
}

fn append_query(url: &str, pair: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{pair}")
}
