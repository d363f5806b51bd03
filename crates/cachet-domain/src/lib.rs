//! # cachet domain
//!
//! Backend-agnostic cache contract and the shared error vocabulary.
//!
//! ## Modules
//!
//! - [`ports`] - the `Cache`, `CacheBackend`, `Getter` and `OpenCache` traits
//! - [`value_objects`] - expiration sentinels and capability sets
//! - [`error`] - errors surfaced by every backend
//! - [`constants`] - provider identifiers

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{Cache, CacheBackend, Getter, OpenCache};
pub use value_objects::{Capabilities, DEFAULT, Expiration, FOREVER, Operation};
