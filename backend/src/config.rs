//! Configuration management for the Disaster Early Warning System
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with DEWS_ prefix
//! 4. Plain variables used by older deployments (PORT, WEATHER_API_URL,
//!    WEATHER_API_KEY, CORS_ORIGIN)

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Alert storage configuration
    pub storage: StorageConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    #[serde(default)]
    pub api_key: String,

    /// Upstream request timeout in seconds
    pub request_timeout_seconds: u64,

    /// How long a cached reading stays fresh, in seconds
    pub cache_ttl_seconds: u64,

    /// Maximum number of cached locations
    pub cache_capacity: usize,
}

impl WeatherConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

/// Where alerts are kept
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Storage backend for alerts
    pub backend: StorageBackend,

    /// Path of the JSON alerts file (file backend only)
    pub alerts_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origin, or "*" for any
    pub allowed_origin: String,
}

/// Log output format
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("DEWS_ENVIRONMENT")
            .or_else(|_| std::env::var("NODE_ENV"))
            .unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("weather.request_timeout_seconds", 10)?
            .set_default("weather.cache_ttl_seconds", 600)?
            .set_default("weather.cache_capacity", 256)?
            .set_default("storage.backend", "file")?
            .set_default("storage.alerts_path", "data/alerts.json")?
            .set_default("cors.allowed_origin", "*")?
            .set_default("log.format", "pretty")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (DEWS_ prefix)
            .add_source(
                Environment::with_prefix("DEWS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Variables from older deployments
            .set_override_option("server.port", legacy_var("PORT"))?
            .set_override_option("weather.api_endpoint", legacy_var("WEATHER_API_URL"))?
            .set_override_option("weather.api_key", legacy_var("WEATHER_API_KEY"))?
            .set_override_option("cors.allowed_origin", legacy_var("CORS_ORIGIN"))?
            .build()?;

        config.try_deserialize()
    }
}

fn legacy_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for tests: in-memory alerts, no upstream key
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            weather: WeatherConfig {
                api_endpoint: "http://localhost:0".to_string(),
                api_key: String::new(),
                request_timeout_seconds: 1,
                cache_ttl_seconds: 600,
                cache_capacity: 16,
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                alerts_path: String::new(),
            },
            cors: CorsConfig {
                allowed_origin: "*".to_string(),
            },
            log: LogConfig {
                format: LogFormat::Pretty,
            },
        }
    }
}
