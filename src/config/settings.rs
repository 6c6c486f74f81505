//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// CORS origins allowed to call the API; `"*"` opens it up entirely.
    /// Empty means no cross-origin access.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Database configuration. Pool timeouts are in seconds; the optional ones
/// disable the bound when absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: Option<u64>,
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: Option<u64>,
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_idle_timeout_secs() -> Option<u64> {
    Some(600)
}

fn default_max_lifetime_secs() -> Option<u64> {
    Some(1800)
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 secret used to verify bearer tokens issued by the auth provider
    pub jwt_secret: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("GATHERHUB").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::GatherHubError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                allowed_origins: Vec::new(),
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/gatherhub".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: default_acquire_timeout_secs(),
                idle_timeout_secs: default_idle_timeout_secs(),
                max_lifetime_secs: default_max_lifetime_secs(),
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/gatherhub".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_timeouts_have_defaults() {
        // A config file that only sets the required fields still yields a
        // fully-specified pool configuration
        let config: DatabaseConfig = serde_json::from_value(serde_json::json!({
            "url": "postgresql://localhost/gatherhub",
            "max_connections": 5,
            "min_connections": 1
        }))
        .unwrap();

        assert_eq!(config.acquire_timeout_secs, 30);
        assert_eq!(config.idle_timeout_secs, Some(600));
        assert_eq!(config.max_lifetime_secs, Some(1800));
    }

    #[test]
    fn test_database_timeouts_are_configurable() {
        let config: DatabaseConfig = serde_json::from_value(serde_json::json!({
            "url": "postgresql://localhost/gatherhub",
            "max_connections": 5,
            "min_connections": 1,
            "acquire_timeout_secs": 5,
            "idle_timeout_secs": null,
            "max_lifetime_secs": 60
        }))
        .unwrap();

        assert_eq!(config.acquire_timeout_secs, 5);
        assert_eq!(config.idle_timeout_secs, None);
        assert_eq!(config.max_lifetime_secs, Some(60));
    }

    #[test]
    fn test_allowed_origins_default_to_empty() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "host": "127.0.0.1",
            "port": 8080
        }))
        .unwrap();

        assert!(config.allowed_origins.is_empty());
    }
}
