//! Unit tests for domain error types

use cachet_domain::{Error, Operation};
use std::error::Error as _;

#[test]
fn test_cache_miss_predicates() {
    let error = Error::CacheMiss;
    assert!(error.is_cache_miss());
    assert!(!error.is_not_stored());
    assert!(!error.is_unsupported());
    assert_eq!(error.to_string(), "cache miss");
}

#[test]
fn test_not_stored_predicates() {
    let error = Error::NotStored;
    assert!(error.is_not_stored());
    assert!(!error.is_cache_miss());
}

#[test]
fn test_unsupported_error() {
    let error = Error::unsupported(Operation::Replace, "memcached");
    assert!(error.is_unsupported());
    match &error {
        Error::Unsupported {
            operation,
            provider,
        } => {
            assert_eq!(*operation, Operation::Replace);
            assert_eq!(provider, "memcached");
        }
        _ => panic!("Expected Unsupported error"),
    }
    assert_eq!(
        error.to_string(),
        "replace is not supported by the memcached cache"
    );
}

#[test]
fn test_configuration_error() {
    let error = Error::configuration("no hosts");
    match error {
        Error::Configuration { message, source } => {
            assert_eq!(message, "no hosts");
            assert!(source.is_none());
        }
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_configuration_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
    let error = Error::configuration_with_source("failed to read config", io);
    assert!(error.to_string().contains("failed to read config"));
    assert!(error.source().is_some());
}

#[test]
fn test_backend_error_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = Error::backend("memcached", io);
    assert!(error.to_string().contains("memcached backend error"));
    let source = error.source().expect("backend errors carry their source");
    assert_eq!(source.to_string(), "refused");
}

#[test]
fn test_type_mismatch_error_names_key() {
    let io = std::io::Error::other("bad payload");
    let error = Error::type_mismatch("user:1", io);
    assert!(error.to_string().contains("user:1"));
}
