//! Value Objects
//!
//! Small immutable types shared by the cache contract and its backends.

pub mod capabilities;
pub mod expiration;

pub use capabilities::{Capabilities, Operation};
pub use expiration::{DEFAULT, Expiration, FOREVER};
