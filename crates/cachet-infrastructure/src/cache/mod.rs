//! Cache wiring
//!
//! Builds configured cache handles. Backend implementations live in
//! `cachet-providers`.

pub mod factory;

pub use factory::{CacheFactory, CacheValue, SharedCache};
