//! Moka in-memory cache provider
//!
//! Process-local cache holding values natively (no serialization) in a
//! concurrent Moka store.
//!
//! ## Features
//!
//! - Per-entry expiration with handle-level default
//! - Atomic add / replace / counter updates through Moka's entry API
//! - Optional capacity bound (eviction handled by Moka)
//!
//! ## Example
//!
//! ```ignore
//! use cachet_providers::cache::InMemoryCache;
//! use std::time::Duration;
//!
//! let cache: InMemoryCache<String> = InMemoryCache::new(Duration::from_secs(300));
//! ```

use cachet_domain::constants::IN_MEMORY_PROVIDER_NAME;
use cachet_domain::error::{Error, Result};
use cachet_domain::ports::{Cache, CacheBackend, Getter, OpenCache};
use cachet_domain::value_objects::{Capabilities, Expiration};
use moka::Expiry;
use moka::ops::compute::Op;
use moka::sync::Cache as MokaCache;
use serde_json::Value;
use std::any::Any;
use std::time::{Duration, Instant};

/// Stored value plus its absolute deadline
#[derive(Clone)]
struct Slot<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> Slot<V> {
    fn new(value: V, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.and_then(|ttl| Instant::now().checked_add(ttl)),
        }
    }

    fn remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

/// Expiry policy reading each slot's own deadline
///
/// Updates re-read the deadline so `set` resets it while counter updates,
/// which copy the old slot, keep it.
struct SlotExpiry;

impl<V> Expiry<String, Slot<V>> for SlotExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        slot: &Slot<V>,
        created_at: Instant,
    ) -> Option<Duration> {
        slot.remaining(created_at)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        slot: &Slot<V>,
        updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        slot.remaining(updated_at)
    }
}

/// Moka-based in-memory cache
///
/// Holds values of type `V` as-is; [`get`](Getter::get) returns a clone.
/// A counter is a value whose type is `u64`. Cloning the handle shares the
/// underlying store.
#[derive(Clone)]
pub struct InMemoryCache<V> {
    store: MokaCache<String, Slot<V>>,
    default_expiration: Duration,
    max_capacity: Option<u64>,
}

impl<V> InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an unbounded cache
    ///
    /// A zero `default_expiration` means entries written with
    /// [`Expiration::Default`] never expire.
    pub fn new(default_expiration: Duration) -> Self {
        Self::build(default_expiration, None)
    }

    /// Create a cache holding at most `max_capacity` entries
    pub fn with_capacity(default_expiration: Duration, max_capacity: u64) -> Self {
        Self::build(default_expiration, Some(max_capacity))
    }

    fn build(default_expiration: Duration, max_capacity: Option<u64>) -> Self {
        let mut builder = MokaCache::<String, Slot<V>>::builder().expire_after(SlotExpiry);
        if let Some(capacity) = max_capacity {
            builder = builder.max_capacity(capacity);
        }

        Self {
            store: builder.build(),
            default_expiration,
            max_capacity,
        }
    }

    /// Default expiration applied to [`Expiration::Default`] writes
    pub fn default_expiration(&self) -> Duration {
        self.default_expiration
    }

    /// Capacity bound, if any
    pub fn max_capacity(&self) -> Option<u64> {
        self.max_capacity
    }

    /// Number of live entries
    pub fn entry_count(&self) -> u64 {
        // Run pending tasks to ensure entry_count is accurate
        self.store.run_pending_tasks();
        self.store.entry_count()
    }

    fn slot(&self, value: V, expires: Expiration) -> Slot<V> {
        Slot::new(value, expires.resolve(self.default_expiration))
    }

    /// Apply `update` to the counter stored under `key`, keeping its deadline
    ///
    /// A counter is either a native `u64` or a JSON number that fits one.
    fn update_counter(&self, key: &str, update: impl FnOnce(u64) -> u64) -> Result<u64> {
        let mut outcome = Err(Error::CacheMiss);

        let _ = self
            .store
            .entry(key.to_owned())
            .and_compute_with(|current| {
                let Some(entry) = current else {
                    return Op::Nop;
                };
                let mut slot = entry.into_value();
                let Some(next) = apply_counter(&mut slot.value, update) else {
                    return Op::Nop;
                };
                outcome = Ok(next);
                Op::Put(slot)
            });

        outcome
    }
}

fn apply_counter<V: Any>(value: &mut V, update: impl FnOnce(u64) -> u64) -> Option<u64> {
    let value = value as &mut dyn Any;
    if let Some(counter) = value.downcast_mut::<u64>() {
        *counter = update(*counter);
        return Some(*counter);
    }
    let json = value.downcast_mut::<Value>()?;
    let next = update(json.as_u64()?);
    *json = Value::from(next);
    Some(next)
}

impl<V> Default for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl<V> OpenCache for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// The configuration string is ignored
    fn open(_config: &str) -> Result<Self> {
        Ok(Self::default())
    }
}

impl<V> Getter<V> for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &str) -> Result<V> {
        self.store
            .get(key)
            .map(|slot| slot.value)
            .ok_or(Error::CacheMiss)
    }
}

impl<V> CacheBackend for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Removing an absent key succeeds
    fn delete(&self, key: &str) -> Result<()> {
        self.store.invalidate(key);
        Ok(())
    }

    fn increment(&self, key: &str, delta: u64) -> Result<u64> {
        self.update_counter(key, |counter| counter.wrapping_add(delta))
    }

    fn decrement(&self, key: &str, delta: u64) -> Result<u64> {
        self.update_counter(key, |counter| counter.saturating_sub(delta))
    }

    fn flush(&self) -> Result<()> {
        self.store.invalidate_all();
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    fn provider_name(&self) -> &str {
        IN_MEMORY_PROVIDER_NAME
    }
}

impl<V> Cache<V> for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Lookups are served by the cache itself, one per requested key
    fn get_multi(&self, _keys: &[&str]) -> Result<Box<dyn Getter<V>>> {
        Ok(Box::new(self.clone()))
    }

    fn set(&self, key: &str, value: V, expires: Expiration) -> Result<()> {
        self.store.insert(key.to_owned(), self.slot(value, expires));
        Ok(())
    }

    fn add(&self, key: &str, value: V, expires: Expiration) -> Result<()> {
        let slot = self.slot(value, expires);
        let entry = self.store.entry(key.to_owned()).or_insert_with(|| slot);
        if entry.is_fresh() {
            Ok(())
        } else {
            Err(Error::NotStored)
        }
    }

    fn replace(&self, key: &str, value: V, expires: Expiration) -> Result<()> {
        let slot = self.slot(value, expires);
        let mut replaced = false;

        let _ = self
            .store
            .entry(key.to_owned())
            .and_compute_with(|current| {
                if current.is_some() {
                    replaced = true;
                    Op::Put(slot)
                } else {
                    Op::Nop
                }
            });

        if replaced {
            Ok(())
        } else {
            Err(Error::NotStored)
        }
    }
}

impl<V> std::fmt::Debug for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("default_expiration", &self.default_expiration)
            .field("max_capacity", &self.max_capacity)
            .field("entries", &self.store.entry_count())
            .finish()
    }
}
