//! Memcached error translation
//!
//! Maps memcache client failures onto the shared error vocabulary. Expected
//! conditions are translated silently; anything else is logged here and
//! passed through unchanged as [`Error::Backend`].

use cachet_domain::constants::MEMCACHED_PROVIDER_NAME;
use cachet_domain::error::Error;
use memcache::{ClientError, CommandError, MemcacheError};
use tracing::warn;

/// Binary protocol status: item not stored
pub(crate) const STATUS_ITEM_NOT_STORED: u16 = 0x05;

/// Binary protocol status: incr/decr on a non-numeric value
pub(crate) const STATUS_NON_NUMERIC_VALUE: u16 = 0x06;

/// Text protocol reply fragment for incr/decr on a non-numeric value
const NON_NUMERIC_REPLY: &str = "non-numeric value";

/// Translate an error returned by a get/store/delete command
pub(crate) fn convert_memcache_error(err: MemcacheError) -> Error {
    match err {
        MemcacheError::CommandError(CommandError::KeyNotFound) => Error::CacheMiss,
        MemcacheError::CommandError(
            CommandError::KeyExists | CommandError::Unknown(STATUS_ITEM_NOT_STORED),
        ) => Error::NotStored,
        other => pass_through(other),
    }
}

/// Translate an error returned by `incr`/`decr`
///
/// A key holding something other than a decimal counter is reported as a
/// miss, the same as an absent key.
pub(crate) fn convert_counter_error(err: MemcacheError) -> Error {
    match err {
        MemcacheError::CommandError(CommandError::Unknown(STATUS_NON_NUMERIC_VALUE)) => {
            Error::CacheMiss
        }
        MemcacheError::ClientError(ClientError::Error(ref reply))
            if reply.contains(NON_NUMERIC_REPLY) =>
        {
            Error::CacheMiss
        }
        other => convert_memcache_error(other),
    }
}

fn pass_through(err: MemcacheError) -> Error {
    warn!(
        provider = MEMCACHED_PROVIDER_NAME,
        error = %err,
        "Unmapped memcached error"
    );
    Error::backend(MEMCACHED_PROVIDER_NAME, err)
}
