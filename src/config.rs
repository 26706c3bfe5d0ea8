use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::client::DEFAULT_BASE_URL;

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the catalog API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Keyword queried when both search text and category are cleared
    #[serde(default = "default_query")]
    pub default_query: String,
    /// Path of the favorites file
    #[serde(default = "default_favorites_path")]
    pub favorites_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            default_query: default_query(),
            favorites_path: default_favorites_path(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_query() -> String {
    "chicken".to_string()
}

fn default_favorites_path() -> String {
    "favorites.json".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPEBOX__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPEBOX__DEFAULT_QUERY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPEBOX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_base_url(), DEFAULT_BASE_URL);
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_query(), "chicken");
        assert_eq!(default_favorites_path(), "favorites.json");
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.default_query, "chicken");
    }

    #[test]
    fn test_partial_override() {
        let config: AppConfig =
            serde_json::from_str(r#"{"default_query": "beef", "timeout": 5}"#).unwrap();
        assert_eq!(config.default_query, "beef");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.favorites_path, "favorites.json");
    }
}
