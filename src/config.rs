//! Configuration management for the e-ICT server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Remote sheet record store. An empty `url` disables mirroring.
#[derive(Debug, Deserialize, Clone)]
pub struct SheetConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "SheetConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub sheet: SheetConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix EICT_)
            .add_source(
                Environment::with_prefix("EICT")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override sheet URL from SHEET_URL env var if present
            .set_override_option("sheet.url", env::var("SHEET_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl SheetConfig {
    fn default_timeout_secs() -> u64 {
        15
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
