//! Configuration management for the vineyard dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides: `VINEYARD_` prefix, `__` between
//!    nested keys (`VINEYARD_SERVER__PORT=8080`)

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::DataConfig;

/// Main dashboard configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Dataset produced by the simulator
    pub data: DataConfig,

    /// Server configuration
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("VINEYARD_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let server = ServerConfig::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("data.path", shared::DEFAULT_DATA_PATH)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("server.host", server.host)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables, e.g. VINEYARD_SERVER__PORT=8080
            .add_source(
                Environment::with_prefix("VINEYARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8050,
            host: "127.0.0.1".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_uses_single_underscore_prefix() {
        std::env::set_var("VINEYARD_SERVER__PORT", "9123");
        let loaded = Config::load();
        std::env::remove_var("VINEYARD_SERVER__PORT");

        let config = loaded.unwrap();
        assert_eq!(config.server.port, 9123);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.data.path, std::path::PathBuf::from(shared::DEFAULT_DATA_PATH));
    }
}
