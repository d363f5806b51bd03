//! Batch lookup view over a memcached multi-get response

use crate::serialization::deserialize;
use cachet_domain::error::{Error, Result};
use cachet_domain::ports::Getter;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Items returned by one multi-get, keyed by cache key
///
/// Keys the server did not return are misses.
#[derive(Debug, Clone, Default)]
pub struct ItemMapGetter {
    items: HashMap<String, Vec<u8>>,
}

impl ItemMapGetter {
    /// Wrap a raw item map
    pub fn new(items: HashMap<String, Vec<u8>>) -> Self {
        Self { items }
    }

    /// Number of keys found
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no requested key was found
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `key` was part of the response
    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }
}

impl<V: DeserializeOwned> Getter<V> for ItemMapGetter {
    fn get(&self, key: &str) -> Result<V> {
        let bytes = self.items.get(key).ok_or(Error::CacheMiss)?;
        deserialize(key, bytes)
    }
}

impl From<HashMap<String, Vec<u8>>> for ItemMapGetter {
    fn from(items: HashMap<String, Vec<u8>>) -> Self {
        Self::new(items)
    }
}
