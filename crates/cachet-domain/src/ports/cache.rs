//! Cache Port
//!
//! The contract every cache backend implements. Backends currently provided:
//!
//! - **In-memory** (Moka): values stored natively in the process
//! - **Memcached**: values serialized and sent to a memcached cluster
//!
//! ## Trait layout
//!
//! Operations that take or return a value are generic over the value type
//! `V` and live on [`Cache`] and [`Getter`]. Operations that never mention a
//! value (delete, counters, flush) live on [`CacheBackend`], so they can be
//! called on a handle that serves many value types without annotations.
//!
//! # Example
//!
//! ```ignore
//! use cachet_domain::ports::{Cache, CacheBackend, Getter};
//! use cachet_domain::value_objects::FOREVER;
//!
//! cache.set("hits", 10u64, FOREVER)?;
//! let hits = cache.increment("hits", 5)?;
//! assert_eq!(hits, 15);
//!
//! let found = cache.get_multi(&["a", "b"])?;
//! let a: u64 = found.get("a")?;
//! ```

use crate::error::Result;
use crate::value_objects::{Capabilities, Expiration};
use std::fmt;

/// Single-key lookup
///
/// Implemented by every cache handle and by the views returned from
/// [`Cache::get_multi`]. An absent key yields
/// [`Error::CacheMiss`](crate::error::Error::CacheMiss).
pub trait Getter<V> {
    /// Fetch the value stored under `key`
    fn get(&self, key: &str) -> Result<V>;
}

/// Value-independent cache operations
pub trait CacheBackend: Send + Sync + fmt::Debug {
    /// Remove `key`
    ///
    /// Whether removing an absent key is an error depends on the backend.
    fn delete(&self, key: &str) -> Result<()>;

    /// Atomically add `delta` to the unsigned counter stored under `key`
    ///
    /// Returns the new value. Fails with `CacheMiss` when the key is absent or
    /// does not hold a counter.
    fn increment(&self, key: &str, delta: u64) -> Result<u64>;

    /// Atomically subtract `delta` from the unsigned counter stored under `key`
    ///
    /// The counter does not go below zero.
    fn decrement(&self, key: &str, delta: u64) -> Result<u64>;

    /// Remove every entry
    fn flush(&self) -> Result<()>;

    /// Operations this backend implements
    fn capabilities(&self) -> Capabilities;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

/// Cache contract for values of type `V`
pub trait Cache<V>: Getter<V> + CacheBackend {
    /// Fetch several keys at once
    ///
    /// Keys missing from the backend's answer are reported as misses by the
    /// returned view, never as an error of this call.
    fn get_multi(&self, keys: &[&str]) -> Result<Box<dyn Getter<V>>>;

    /// Store `value` unconditionally
    fn set(&self, key: &str, value: V, expires: Expiration) -> Result<()>;

    /// Store `value` only if `key` is absent, else `NotStored`
    fn add(&self, key: &str, value: V, expires: Expiration) -> Result<()>;

    /// Store `value` only if `key` is present, else `NotStored`
    fn replace(&self, key: &str, value: V, expires: Expiration) -> Result<()>;
}

/// Construction from an opaque configuration string
pub trait OpenCache: Sized {
    /// Build a configured handle, failing with a configuration error when
    /// required fields are absent or malformed
    fn open(config: &str) -> Result<Self>;
}
