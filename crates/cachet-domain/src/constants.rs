//! Domain layer constants

// ============================================================================
// CACHE DOMAIN CONSTANTS
// ============================================================================

/// Provider name reported by the in-memory backend
pub const IN_MEMORY_PROVIDER_NAME: &str = "memory";

/// Provider name reported by the memcached backend
pub const MEMCACHED_PROVIDER_NAME: &str = "memcached";
