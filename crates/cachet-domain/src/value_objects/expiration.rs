//! Expiration sentinels
//!
//! An entry's lifetime is either a concrete duration or one of two reserved
//! values interpreted by the backend: [`Expiration::Default`] (the handle's
//! configured default) and [`Expiration::Forever`] (never expire).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Use the handle's configured default expiration
pub const DEFAULT: Expiration = Expiration::Default;

/// Never expire
pub const FOREVER: Expiration = Expiration::Forever;

/// Expiration requested for a single write
///
/// A zero duration, whether passed through [`Expiration::After`] or configured
/// as a handle default, means "no expiration".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expiration {
    /// Use the handle's configured default
    #[default]
    Default,
    /// Never expire
    Forever,
    /// Expire after the given duration
    ///
    /// Memcached reads any expiration above 30 days (2,592,000 seconds) as an
    /// absolute unix timestamp, so longer durations sent to it expire at once.
    After(Duration),
}

impl Expiration {
    /// Expire after `secs` seconds
    pub fn after_secs(secs: u64) -> Self {
        Self::After(Duration::from_secs(secs))
    }

    /// Resolve the sentinels against a handle default
    ///
    /// Returns `None` when the entry must never expire.
    pub fn resolve(self, default: Duration) -> Option<Duration> {
        let ttl = match self {
            Self::Default => default,
            Self::Forever => return None,
            Self::After(ttl) => ttl,
        };
        (!ttl.is_zero()).then_some(ttl)
    }

    /// Resolve to whole seconds, `0` meaning "no expiration"
    ///
    /// Sub-second remainders are truncated and values beyond `u32::MAX`
    /// seconds are clamped. The result is passed to memcached unchanged, which
    /// treats values above 30 days as unix timestamps.
    pub fn resolve_secs(self, default: Duration) -> u32 {
        self.resolve(default)
            .map_or(0, |ttl| u32::try_from(ttl.as_secs()).unwrap_or(u32::MAX))
    }
}

impl From<Duration> for Expiration {
    fn from(ttl: Duration) -> Self {
        Self::After(ttl)
    }
}
