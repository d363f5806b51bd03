//! Error handling types
//!
//! The shared error vocabulary surfaced by every cache backend. Backends
//! translate their native failures into these variants; failures they do not
//! recognize are carried unchanged inside [`Error::Backend`].

use crate::value_objects::Operation;
use thiserror::Error;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by pass-through variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for cache operations
#[derive(Error, Debug)]
pub enum Error {
    /// The key is absent, expired, or does not hold a counter
    #[error("cache miss")]
    CacheMiss,

    /// A conditional write was rejected (add on an existing key, replace on an absent one)
    #[error("item not stored")]
    NotStored,

    /// The backend intentionally does not implement the operation
    #[error("{operation} is not supported by the {provider} cache")]
    Unsupported {
        /// The rejected operation
        operation: Operation,
        /// Name of the provider that rejected it
        provider: String,
    },

    /// Configuration is missing required fields or is malformed
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// A stored payload could not be decoded into the requested type
    #[error("cached value for key '{key}' does not match the requested type: {source}")]
    TypeMismatch {
        /// Key whose value failed to decode
        key: String,
        /// Decoder error
        #[source]
        source: BoxError,
    },

    /// A value could not be encoded for storage
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Unrecognized failure reported by the underlying backend
    #[error("{provider} backend error: {source}")]
    Backend {
        /// Name of the provider that reported the failure
        provider: String,
        /// The original backend error
        #[source]
        source: BoxError,
    },
}

// Error creation methods
impl Error {
    /// Create an unsupported-operation error
    pub fn unsupported<S: Into<String>>(operation: Operation, provider: S) -> Self {
        Self::Unsupported {
            operation,
            provider: provider.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a type mismatch error for `key`
    pub fn type_mismatch<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        key: S,
        source: E,
    ) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Create a serialization error with source
    pub fn serialization_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wrap an unrecognized backend error without altering it
    pub fn backend<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        provider: S,
        source: E,
    ) -> Self {
        Self::Backend {
            provider: provider.into(),
            source: Box::new(source),
        }
    }
}

// Classification helpers
impl Error {
    /// True for [`Error::CacheMiss`]
    pub fn is_cache_miss(&self) -> bool {
        matches!(self, Self::CacheMiss)
    }

    /// True for [`Error::NotStored`]
    pub fn is_not_stored(&self) -> bool {
        matches!(self, Self::NotStored)
    }

    /// True for [`Error::Unsupported`]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
