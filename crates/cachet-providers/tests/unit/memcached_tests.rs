//! Memcached cache provider tests
//!
//! Runs the adapter against an in-process client that answers the way a
//! memcached server does, so no server is needed.

use cachet_domain::{
    Cache, CacheBackend, DEFAULT, Error, Expiration, FOREVER, Getter, Operation,
};
use cachet_providers::cache::MemcachedCache;
use cachet_providers::cache::memcached::{
    CommandError, ItemMapGetter, MEMCACHED_CAPABILITIES, MemcacheError, MemcachedClient,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TestValue {
    data: String,
    number: i32,
}

fn test_value() -> TestValue {
    TestValue {
        data: "test data".to_string(),
        number: 42,
    }
}

/// Item bytes plus the expiration sent with them
type Item = (Vec<u8>, u32);

#[derive(Debug, Default)]
struct FakeMemcached {
    items: Mutex<HashMap<String, Item>>,
    unreachable: bool,
}

impl FakeMemcached {
    fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), MemcacheError> {
        if self.unreachable {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused").into());
        }
        Ok(())
    }

    fn raw(&self, key: &str) -> Option<Item> {
        self.items.lock().unwrap().get(key).cloned()
    }

    fn put_raw(&self, key: &str, bytes: &[u8]) {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), (bytes.to_vec(), 0));
    }

    fn update_counter(
        &self,
        key: &str,
        update: impl FnOnce(u64) -> u64,
    ) -> Result<u64, MemcacheError> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let Some((bytes, _)) = items.get_mut(key) else {
            return Err(MemcacheError::CommandError(CommandError::KeyNotFound));
        };
        let current = std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            // binary status 0x06: incr/decr on a non-numeric value
            .ok_or(MemcacheError::CommandError(CommandError::Unknown(0x06)))?;
        let next = update(current);
        *bytes = next.to_string().into_bytes();
        Ok(next)
    }
}

impl MemcachedClient for FakeMemcached {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, MemcacheError> {
        self.check()?;
        Ok(self.raw(key).map(|(bytes, _)| bytes))
    }

    fn get_multi(&self, keys: &[&str]) -> Result<HashMap<String, Vec<u8>>, MemcacheError> {
        self.check()?;
        let items = self.items.lock().unwrap();
        Ok(keys
            .iter()
            .filter_map(|key| {
                items
                    .get(*key)
                    .map(|(bytes, _)| ((*key).to_string(), bytes.clone()))
            })
            .collect())
    }

    fn set(&self, key: &str, value: &[u8], expiration: u32) -> Result<(), MemcacheError> {
        self.check()?;
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_vec(), expiration));
        Ok(())
    }

    fn add(&self, key: &str, value: &[u8], expiration: u32) -> Result<(), MemcacheError> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        if items.contains_key(key) {
            return Err(MemcacheError::CommandError(CommandError::KeyExists));
        }
        items.insert(key.to_string(), (value.to_vec(), expiration));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, MemcacheError> {
        self.check()?;
        Ok(self.items.lock().unwrap().remove(key).is_some())
    }

    fn increment(&self, key: &str, delta: u64) -> Result<u64, MemcacheError> {
        self.update_counter(key, |n| n.wrapping_add(delta))
    }

    fn decrement(&self, key: &str, delta: u64) -> Result<u64, MemcacheError> {
        self.update_counter(key, |n| n.saturating_sub(delta))
    }
}

fn cache() -> MemcachedCache<FakeMemcached> {
    MemcachedCache::with_client(FakeMemcached::default(), Duration::from_secs(60))
}

#[test]
fn test_set_then_get_returns_value() {
    let cache = cache();
    cache.set("test_key", test_value(), FOREVER).unwrap();

    let retrieved: TestValue = cache.get("test_key").unwrap();
    assert_eq!(retrieved, test_value());
}

#[test]
fn test_get_missing_key_is_cache_miss() {
    let cache = cache();
    let result: Result<TestValue, Error> = cache.get("nonexistent");
    assert!(matches!(result, Err(Error::CacheMiss)));
}

#[test]
fn test_values_are_serialized_on_the_wire() {
    let cache = cache();
    cache.set("count", 42u64, FOREVER).unwrap();

    let (bytes, _) = cache.client().raw("count").unwrap();
    assert_eq!(bytes, b"42");
}

#[test]
fn test_get_with_wrong_type_is_type_mismatch() {
    let cache = cache();
    cache.set("k", "text".to_string(), FOREVER).unwrap();

    let result: Result<u64, Error> = cache.get("k");
    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
}

#[test]
fn test_expiration_sentinels_are_resolved_before_write() {
    let cache = cache();
    cache.set("default", 1u64, DEFAULT).unwrap();
    cache.set("forever", 1u64, FOREVER).unwrap();
    cache
        .set("explicit", 1u64, Expiration::After(Duration::from_millis(90_500)))
        .unwrap();

    assert_eq!(cache.client().raw("default").unwrap().1, 60);
    assert_eq!(cache.client().raw("forever").unwrap().1, 0);
    // truncated to whole seconds
    assert_eq!(cache.client().raw("explicit").unwrap().1, 90);
}

#[test]
fn test_add_only_inserts_absent_keys() {
    let cache = cache();
    cache.add("k", "v1".to_string(), DEFAULT).unwrap();

    let second = cache.add("k", "v2".to_string(), DEFAULT);
    assert!(matches!(second, Err(Error::NotStored)));

    let value: String = cache.get("k").unwrap();
    assert_eq!(value, "v1");
}

#[test]
fn test_replace_is_unsupported() {
    let cache = cache();
    let result = cache.replace("absent", 1u64, DEFAULT);
    assert!(matches!(
        result,
        Err(Error::Unsupported {
            operation: Operation::Replace,
            ..
        })
    ));

    cache.set("present", 1u64, FOREVER).unwrap();
    assert!(cache.replace("present", 2u64, FOREVER).unwrap_err().is_unsupported());
    let value: u64 = cache.get("present").unwrap();
    assert_eq!(value, 1);
}

#[test]
fn test_increment_and_decrement_counter() {
    let cache = cache();
    cache.set("hits", 10u64, FOREVER).unwrap();

    assert_eq!(cache.increment("hits", 5).unwrap(), 15);
    assert_eq!(cache.decrement("hits", 3).unwrap(), 12);

    let value: u64 = cache.get("hits").unwrap();
    assert_eq!(value, 12);
}

#[test]
fn test_counter_on_missing_key_is_cache_miss() {
    let cache = cache();
    assert!(matches!(cache.increment("missing", 1), Err(Error::CacheMiss)));
    assert!(matches!(cache.decrement("missing", 1), Err(Error::CacheMiss)));
}

#[test]
fn test_counter_on_non_numeric_value_is_cache_miss() {
    let cache = cache();
    cache.set("name", "ada".to_string(), FOREVER).unwrap();
    assert!(matches!(cache.increment("name", 1), Err(Error::CacheMiss)));
}

#[test]
fn test_delete_then_get_is_cache_miss() {
    let cache = cache();
    cache.set("k", test_value(), FOREVER).unwrap();
    cache.delete("k").unwrap();

    let result: Result<TestValue, Error> = cache.get("k");
    assert!(matches!(result, Err(Error::CacheMiss)));
}

#[test]
fn test_delete_missing_key_is_cache_miss() {
    let cache = cache();
    assert!(matches!(cache.delete("never-set"), Err(Error::CacheMiss)));
}

#[test]
fn test_get_multi_reports_absent_keys_as_misses() {
    let cache = cache();
    cache.set("k1", 1u64, FOREVER).unwrap();
    cache.set("k3", 3u64, FOREVER).unwrap();

    let found: Box<dyn Getter<u64>> = cache.get_multi(&["k1", "k2", "k3"]).unwrap();
    assert_eq!(found.get("k1").unwrap(), 1);
    assert!(matches!(found.get("k2"), Err(Error::CacheMiss)));
    assert_eq!(found.get("k3").unwrap(), 3);
}

#[test]
fn test_item_map_getter() {
    let mut items = HashMap::new();
    items.insert("a".to_string(), b"\"alpha\"".to_vec());
    let getter = ItemMapGetter::from(items);

    assert_eq!(getter.len(), 1);
    assert!(getter.contains_key("a"));
    let alpha: String = getter.get("a").unwrap();
    assert_eq!(alpha, "alpha");
    let missing: Result<String, Error> = getter.get("b");
    assert!(missing.unwrap_err().is_cache_miss());
}

#[test]
fn test_flush_is_unsupported_and_keeps_keys() {
    let cache = cache();
    cache.set("k", 1u64, FOREVER).unwrap();

    let result = cache.flush();
    assert!(matches!(
        result,
        Err(Error::Unsupported {
            operation: Operation::Flush,
            ..
        })
    ));

    let value: u64 = cache.get("k").unwrap();
    assert_eq!(value, 1);
}

#[test]
fn test_capabilities_declare_the_gaps() {
    let cache = cache();
    let caps = cache.capabilities();

    assert_eq!(caps, MEMCACHED_CAPABILITIES);
    assert!(!caps.supports(Operation::Replace));
    assert!(!caps.supports(Operation::Flush));
    assert!(caps.supports(Operation::Add));
    assert_eq!(cache.provider_name(), "memcached");
}

#[test]
fn test_unmapped_errors_pass_through() {
    let cache = MemcachedCache::with_client(FakeMemcached::unreachable(), Duration::ZERO);

    let err = cache.set("k", 1u64, FOREVER).unwrap_err();
    match err {
        Error::Backend { provider, source } => {
            assert_eq!(provider, "memcached");
            assert!(source.to_string().contains("connection refused"));
        }
        other => panic!("Expected Backend error, got {other:?}"),
    }

    let result: Result<u64, Error> = cache.get("k");
    assert!(matches!(result, Err(Error::Backend { .. })));
}

#[test]
fn test_raw_counter_written_elsewhere_is_readable() {
    let cache = cache();
    cache.client().put_raw("visits", b"7");

    assert_eq!(cache.increment("visits", 1).unwrap(), 8);
    let visits: u64 = cache.get("visits").unwrap();
    assert_eq!(visits, 8);
}

#[test]
fn test_serves_several_value_types() {
    let cache = cache();
    cache.set("n", 5u64, FOREVER).unwrap();
    cache.set("s", "five".to_string(), FOREVER).unwrap();
    cache.set("v", test_value(), FOREVER).unwrap();

    let n: u64 = cache.get("n").unwrap();
    let s: String = cache.get("s").unwrap();
    let v: TestValue = cache.get("v").unwrap();
    assert_eq!((n, s.as_str(), v), (5, "five", test_value()));
}
