use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::constants::BASE_URL;

/// Client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FoodyConfig {
    /// Base URL of the recipe API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent as the `apiKey` query parameter
    #[serde(default)]
    pub api_key: Option<String>,
    /// TCP connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Per-read timeout in milliseconds
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// How connectivity is determined before each fetch
    #[serde(default)]
    pub connectivity: ConnectivityMode,
}

/// Source of the connectivity answer
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityMode {
    /// Read the operating system network state
    #[default]
    Auto,
    /// Always report a connection
    Online,
    /// Never report a connection
    Offline,
}

impl Default for FoodyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            connectivity: ConnectivityMode::default(),
        }
    }
}

fn default_base_url() -> String {
    BASE_URL.to_string()
}

fn default_connect_timeout_ms() -> u64 {
    15_000
}

fn default_read_timeout_ms() -> u64 {
    15_000
}

impl FoodyConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FOODY__ prefix
    /// 2. foody.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FOODY__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Load configuration from `foody.toml` and `FOODY__*` environment variables
pub fn load_config() -> Result<FoodyConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("foody").required(false))
        .add_source(
            Environment::with_prefix("FOODY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        let config = FoodyConfig::default();
        assert_eq!(config.base_url, "https://api.spoonacular.com");
        assert!(config.api_key.is_none());
        assert_eq!(config.connect_timeout(), Duration::from_secs(15));
        assert_eq!(config.read_timeout(), Duration::from_secs(15));
        assert_eq!(config.connectivity, ConnectivityMode::Auto);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: FoodyConfig = Config::builder()
            .add_source(File::from_str(
                "api_key = \"secret\"\nread_timeout_ms = 250\nconnectivity = \"offline\"",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.read_timeout(), Duration::from_millis(250));
        assert_eq!(config.connect_timeout(), Duration::from_secs(15));
        assert_eq!(config.connectivity, ConnectivityMode::Offline);
        assert_eq!(config.base_url, BASE_URL);
    }

    #[test]
    fn test_unknown_connectivity_mode_is_rejected() {
        let result: Result<FoodyConfig, _> = Config::builder()
            .add_source(File::from_str("connectivity = \"sometimes\"", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize();

        assert!(result.is_err());
    }
}
