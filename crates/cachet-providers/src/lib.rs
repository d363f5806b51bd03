//! # cachet providers
//!
//! Cache backends implementing the `cachet-domain` contract.
//!
//! ## Features
//!
//! - `cache-memory` (default): Moka-backed [`cache::InMemoryCache`]
//! - `cache-memcached` (default): memcache-backed [`cache::MemcachedCache`]

pub mod cache;
pub mod constants;
pub mod serialization;
