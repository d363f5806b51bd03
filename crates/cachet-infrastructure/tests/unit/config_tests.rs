//! Configuration Tests
//!
//! Loader tests run inside a figment `Jail`, which isolates the working
//! directory and environment variables.

use cachet_infrastructure::config::loader::validate_cache_config;
use cachet_infrastructure::config::{
    AppConfig, CacheConfig, CacheProviderKind, ConfigLoader, LoggingConfig,
};
use cachet_providers::constants::MEMCACHED_DEFAULT_POOL_SIZE;
use figment::Jail;
use std::time::Duration;

#[test]
fn test_cache_config_default() {
    let config = CacheConfig::default();
    assert_eq!(config.provider, CacheProviderKind::Memory);
    assert_eq!(config.default_expiration_secs, 0);
    assert_eq!(config.pool_size, MEMCACHED_DEFAULT_POOL_SIZE);
    assert!(config.hosts.is_empty());
    assert!(validate_cache_config(&config).is_ok());
}

#[test]
fn test_provider_kind_from_str() {
    assert_eq!("memory".parse::<CacheProviderKind>().unwrap(), CacheProviderKind::Memory);
    assert_eq!("InMemory".parse::<CacheProviderKind>().unwrap(), CacheProviderKind::Memory);
    assert_eq!("moka".parse::<CacheProviderKind>().unwrap(), CacheProviderKind::Memory);
    assert_eq!(
        " memcached ".parse::<CacheProviderKind>().unwrap(),
        CacheProviderKind::Memcached
    );
    assert_eq!(
        "memcache".parse::<CacheProviderKind>().unwrap(),
        CacheProviderKind::Memcached
    );

    let err = "redis".parse::<CacheProviderKind>().unwrap_err();
    assert!(err.to_string().contains("Unknown cache provider: redis"));
}

#[test]
fn test_provider_kind_display_matches_provider_name() {
    assert_eq!(CacheProviderKind::Memory.to_string(), "memory");
    assert_eq!(CacheProviderKind::Memcached.to_string(), "memcached");
}

#[test]
fn test_provider_kind_serde_aliases() {
    let config: CacheConfig = toml::from_str(r#"provider = "moka""#).unwrap();
    assert_eq!(config.provider, CacheProviderKind::Memory);

    let config: CacheConfig = toml::from_str(r#"provider = "memcache""#).unwrap();
    assert_eq!(config.provider, CacheProviderKind::Memcached);
}

#[test]
fn test_memcached_options_from_config() {
    let config = CacheConfig {
        provider: CacheProviderKind::Memcached,
        default_expiration_secs: 90,
        hosts: vec![" 10.0.0.1:11211 ".to_string(), String::new(), "cache-2".to_string()],
        pool_size: 2,
        timeout_ms: Some(250),
        ..CacheConfig::default()
    };

    let options = config.memcached_options();
    assert_eq!(options.hosts, ["10.0.0.1:11211", "cache-2"]);
    assert_eq!(options.default_expiration, Duration::from_secs(90));
    assert_eq!(options.pool_size, 2);
    assert_eq!(options.timeout, Some(Duration::from_millis(250)));
}

#[test]
fn test_validate_memcached_requires_hosts() {
    let config = CacheConfig {
        provider: CacheProviderKind::Memcached,
        hosts: vec!["  ".to_string()],
        ..CacheConfig::default()
    };

    let err = validate_cache_config(&config).unwrap_err();
    assert!(err.to_string().contains("requires at least one host"));
}

#[test]
fn test_validate_rejects_zero_pool_size() {
    let config = CacheConfig {
        pool_size: 0,
        ..CacheConfig::default()
    };

    assert!(validate_cache_config(&config).is_err());
}

#[test]
fn test_load_defaults_without_file() {
    Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    });
}

#[test]
fn test_load_from_default_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "cachet.toml",
            r#"
            [logging]
            level = "debug"

            [cache]
            provider = "memcached"
            hosts = ["10.0.0.1:11211", "10.0.0.2:11211"]
            default_expiration_secs = 300
            "#,
        )?;

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.cache.provider, CacheProviderKind::Memcached);
        assert_eq!(config.cache.hosts.len(), 2);
        assert_eq!(config.cache.default_expiration_secs, 300);
        assert_eq!(config.cache.pool_size, MEMCACHED_DEFAULT_POOL_SIZE);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
            [cache]
            provider = "memory"
            max_capacity = 100
            "#,
        )?;
        jail.set_env("CACHET_CACHE__MAX_CAPACITY", "500");
        jail.set_env("CACHET_LOGGING__JSON_FORMAT", "true");

        let loader = ConfigLoader::new().with_config_path("custom.toml");
        let config = loader.load().map_err(|e| e.to_string())?;
        assert_eq!(config.cache.max_capacity, Some(500));
        assert!(config.logging.json_format);
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("MYAPP_CACHE__DEFAULT_EXPIRATION_SECS", "42");

        let config = ConfigLoader::new()
            .with_env_prefix("MYAPP")
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(config.cache.default_expiration_secs, 42);
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    Jail::expect_with(|_jail| {
        let loader = ConfigLoader::new().with_config_path("absent.toml");
        let config = loader.load().map_err(|e| e.to_string())?;
        assert_eq!(config.cache, CacheConfig::default());
        Ok(())
    });
}

#[test]
fn test_load_rejects_memcached_without_hosts() {
    Jail::expect_with(|jail| {
        jail.set_env("CACHET_CACHE__PROVIDER", "memcached");

        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("requires at least one host"));
        Ok(())
    });
}

#[test]
fn test_load_rejects_invalid_log_level() {
    Jail::expect_with(|jail| {
        jail.set_env("CACHET_LOGGING__LEVEL", "loud");

        assert!(ConfigLoader::new().load().is_err());
        Ok(())
    });
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cachet.toml");

    let config = AppConfig {
        logging: LoggingConfig {
            level: "warn".to_string(),
            ..LoggingConfig::default()
        },
        cache: CacheConfig {
            provider: CacheProviderKind::Memcached,
            hosts: vec!["cache-1:11211".to_string()],
            timeout_ms: Some(500),
            ..CacheConfig::default()
        },
    };

    let loader = ConfigLoader::new().with_config_path(&path);
    loader.save_to_file(&config, &path).unwrap();
    assert_eq!(loader.config_path(), Some(path.as_path()));

    let reloaded = loader.load().unwrap();
    assert_eq!(reloaded, config);
}
