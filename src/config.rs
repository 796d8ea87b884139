//! Configuration management for the Tourbook client.
//!
//! Configuration is loaded from environment variables, with an optional `.env`
//! file for development setups.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Default HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default TTL for cached list/search responses.
/// Short because seat counts and active flags change frequently and a stale
/// list has user-visible consequences (booking a sold-out excursion).
const DEFAULT_LIST_CACHE_TTL_SECS: u64 = 120;

/// Default TTL for cached single-entity responses.
const DEFAULT_ENTITY_CACHE_TTL_SECS: u64 = 300;

/// Configuration for the Tourbook client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Tourbook backend, e.g. `https://tours.example.com/api`
    pub api_base_url: String,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// TTL in seconds for cached list/search responses (default: 120)
    pub list_cache_ttl_secs: u64,

    /// TTL in seconds for cached single-entity responses (default: 300)
    pub entity_cache_ttl_secs: u64,

    /// Override for the credential storage directory.
    /// When `None`, an XDG-compliant per-user data directory is used.
    pub storage_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `TOURBOOK_API_BASE_URL`: Base URL for the Tourbook API
    ///
    /// Optional environment variables:
    /// - `TOURBOOK_REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
    /// - `TOURBOOK_LIST_CACHE_TTL_SECS`: list-query cache TTL (default: 120)
    /// - `TOURBOOK_ENTITY_CACHE_TTL_SECS`: entity cache TTL (default: 300)
    /// - `TOURBOOK_STORAGE_DIR`: credential storage directory override
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present; missing files are fine.
        let _ = dotenvy::dotenv();

        let api_base_url = env::var("TOURBOOK_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("TOURBOOK_API_BASE_URL".to_string()))?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "TOURBOOK_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout =
            Self::parse_env_u64("TOURBOOK_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let list_cache_ttl_secs =
            Self::parse_env_u64("TOURBOOK_LIST_CACHE_TTL_SECS", DEFAULT_LIST_CACHE_TTL_SECS)?;
        let entity_cache_ttl_secs = Self::parse_env_u64(
            "TOURBOOK_ENTITY_CACHE_TTL_SECS",
            DEFAULT_ENTITY_CACHE_TTL_SECS,
        )?;

        let storage_dir = env::var("TOURBOOK_STORAGE_DIR").ok().map(PathBuf::from);

        Ok(Config {
            api_base_url,
            request_timeout,
            list_cache_ttl_secs,
            entity_cache_ttl_secs,
            storage_dir,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            list_cache_ttl_secs: DEFAULT_LIST_CACHE_TTL_SECS,
            entity_cache_ttl_secs: DEFAULT_ENTITY_CACHE_TTL_SECS,
            storage_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.list_cache_ttl_secs, 120);
        assert_eq!(config.entity_cache_ttl_secs, 300);
        assert!(config.storage_dir.is_none());
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("TOURBOOK_API_BASE_URL", "not-a-url");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "TOURBOOK_API_BASE_URL");
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("TOURBOOK_API_BASE_URL", "https://tours.example.com/api");
        guard.set("TOURBOOK_LIST_CACHE_TTL_SECS", "60");
        guard.set("TOURBOOK_STORAGE_DIR", "/tmp/tourbook-test");

        let result = Config::from_env();
        assert!(result.is_ok(), "Config should be valid: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.api_base_url, "https://tours.example.com/api");
        assert_eq!(config.list_cache_ttl_secs, 60);
        assert_eq!(config.entity_cache_ttl_secs, 300);
        assert_eq!(
            config.storage_dir,
            Some(PathBuf::from("/tmp/tourbook-test"))
        );
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_TOURBOOK_U64", "42");

        let result = Config::parse_env_u64("TEST_TOURBOOK_U64", 10);
        assert_eq!(result.unwrap(), 42);

        let result = Config::parse_env_u64("TEST_TOURBOOK_NONEXISTENT", 10);
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_TOURBOOK_U64_INVALID", "not-a-number");

        let result = Config::parse_env_u64("TEST_TOURBOOK_U64_INVALID", 10);
        assert!(result.is_err());
    }
}
