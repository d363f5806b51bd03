//! Value serialization for byte-oriented backends
//!
//! Values are encoded as JSON. Unsigned integers therefore travel as ASCII
//! decimal digits, which is the representation memcached's `incr`/`decr`
//! operate on: a counter written with `set` can be incremented server-side
//! and read back as a number.

use cachet_domain::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encode `value` into the bytes stored by the backend
pub fn serialize<V: Serialize + ?Sized>(value: &V) -> Result<Vec<u8>> {
    serde_json::to_vec(value)
        .map_err(|e| Error::serialization_with_source("Failed to serialize value for cache", e))
}

/// Decode bytes read for `key` back into `V`
///
/// A payload that does not decode as `V` is reported as a type mismatch.
pub fn deserialize<V: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<V> {
    serde_json::from_slice(bytes).map_err(|e| Error::type_mismatch(key, e))
}
