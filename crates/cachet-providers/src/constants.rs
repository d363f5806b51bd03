//! Provider layer constants

// ============================================================================
// MEMCACHED CONSTANTS
// ============================================================================

/// URL scheme understood by the memcache client (binary protocol)
pub const MEMCACHED_URL_SCHEME: &str = "memcache://";

/// Port assumed for hosts given without one
pub const MEMCACHED_DEFAULT_PORT: u16 = 11211;

/// Connections kept per memcached server
pub const MEMCACHED_DEFAULT_POOL_SIZE: u32 = 4;

/// Separator between hosts in an `open` configuration string
pub const MEMCACHED_HOSTS_SEPARATOR: char = ',';

/// Query pair selecting memcached's text protocol
pub const MEMCACHED_ASCII_PROTOCOL_QUERY: &str = "protocol=ascii";
