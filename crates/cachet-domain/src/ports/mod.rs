//! Domain Port Interfaces
//!
//! Boundary contracts implemented by the cache providers.

/// Cache backend contract
pub mod cache;

pub use cache::{Cache, CacheBackend, Getter, OpenCache};
