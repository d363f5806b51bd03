//! Command line front end
//!
//! Runs single cache operations against the cache described by the loaded
//! configuration. Values are JSON; anything that does not parse as JSON is
//! stored as a string, so `cachet set hits 10` stores a counter.

use cachet_domain::error::Result;
use cachet_domain::ports::{Cache, CacheBackend, Getter};
use cachet_domain::value_objects::{DEFAULT, Expiration};
use cachet_infrastructure::config::{AppConfig, CacheProviderKind, ConfigLoader};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Command line interface for cachet
#[derive(Parser, Debug)]
#[command(name = "cachet")]
#[command(about = "Cachet - run cache operations against a configured backend")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the configured cache provider (memory, memcached)
    #[arg(short, long)]
    pub provider: Option<CacheProviderKind>,

    /// Override the configured memcached hosts
    #[arg(long, value_delimiter = ',')]
    pub hosts: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Cache operations
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch one or more keys
    Get {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Store a value unconditionally
    Set {
        key: String,
        value: String,
        /// Seconds until expiry (0 = never, omitted = configured default)
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Store a value only if the key is absent
    Add {
        key: String,
        value: String,
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Store a value only if the key is present
    Replace {
        key: String,
        value: String,
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Remove a key
    Delete { key: String },
    /// Add to a counter
    Incr {
        key: String,
        #[arg(default_value_t = 1)]
        delta: u64,
    },
    /// Subtract from a counter
    Decr {
        key: String,
        #[arg(default_value_t = 1)]
        delta: u64,
    },
    /// Remove every entry
    Flush,
}

impl Cli {
    /// Load configuration and apply command line overrides
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &self.config {
            loader = loader.with_config_path(path);
        }

        let mut config = loader.load()?;
        if let Some(provider) = self.provider {
            config.cache.provider = provider;
        }
        if !self.hosts.is_empty() {
            config.cache.hosts.clone_from(&self.hosts);
        }
        Ok(config)
    }
}

/// Parse a command line value, falling back to a plain string
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn expiration(ttl: Option<u64>) -> Expiration {
    ttl.map_or(DEFAULT, Expiration::after_secs)
}

/// Run `command` against `cache`, returning the text to print
pub fn execute(cache: &dyn Cache<Value>, command: &Command) -> Result<String> {
    match command {
        Command::Get { keys } => get(cache, keys),
        Command::Set { key, value, ttl } => cache
            .set(key, parse_value(value), expiration(*ttl))
            .map(|()| String::new()),
        Command::Add { key, value, ttl } => cache
            .add(key, parse_value(value), expiration(*ttl))
            .map(|()| String::new()),
        Command::Replace { key, value, ttl } => cache
            .replace(key, parse_value(value), expiration(*ttl))
            .map(|()| String::new()),
        Command::Delete { key } => cache.delete(key).map(|()| String::new()),
        Command::Incr { key, delta } => cache.increment(key, *delta).map(|n| n.to_string()),
        Command::Decr { key, delta } => cache.decrement(key, *delta).map(|n| n.to_string()),
        Command::Flush => cache.flush().map(|()| String::new()),
    }
}

fn get(cache: &dyn Cache<Value>, keys: &[String]) -> Result<String> {
    if let [key] = keys {
        return cache.get(key).map(|value| value.to_string());
    }

    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    let found = cache.get_multi(&refs)?;

    let mut out = String::new();
    for key in keys {
        if !out.is_empty() {
            out.push('\n');
        }
        match found.get(key) {
            Ok(value) => {
                let _ = write!(out, "{key} = {value}");
            }
            Err(e) if e.is_cache_miss() => {
                let _ = write!(out, "{key} (miss)");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}
