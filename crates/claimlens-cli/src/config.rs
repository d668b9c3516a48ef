//! Configuration file parsing for the CLI
//!
//! Settings come from an optional `claimlens.toml`; secrets (oracle API key,
//! source bearer token) come from the environment so they never live in the
//! config file.

use claimlens_analysis::AnalysisConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "claimlens.toml";

/// Environment variable holding the oracle API key
pub const ORACLE_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the post source bearer token
pub const SOURCE_TOKEN_VAR: &str = "TWITTER_BEARER_TOKEN";

/// CLI configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A setting failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// A required environment variable is missing
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),
}

/// CLI configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// SQLite database path
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Oracle client settings
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Pipeline settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Oracle client settings
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// API base URL
    #[serde(default = "default_oracle_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_oracle_model")]
    pub model: String,
}

fn default_db_path() -> String {
    "claimlens.db".to_string()
}

fn default_oracle_endpoint() -> String {
    claimlens_oracle::chat::DEFAULT_ENDPOINT.to_string()
}

fn default_oracle_model() -> String {
    claimlens_oracle::chat::DEFAULT_MODEL.to_string()
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_oracle_endpoint(),
            model: default_oracle_model(),
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            oracle: OracleConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration
    ///
    /// With an explicit path the file must exist; without one,
    /// `claimlens.toml` is used when present and built-in defaults
    /// otherwise.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH)?,
            None => Self::default(),
        };

        config
            .analysis
            .validate()
            .map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: CliConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Read a required secret from the environment
    pub fn env_secret(var: &'static str) -> Result<String, ConfigError> {
        std::env::var(var).map_err(|_| ConfigError::MissingEnv(var))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.db_path, "claimlens.db");
        assert_eq!(config.oracle.model, "gpt-3.5-turbo");
        assert!(config.analysis.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            db_path = "custom.db"

            [analysis]
            max_posts = 5
            oracle_timeout_secs = 10
            max_concurrent_classifications = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.db_path, "custom.db");
        assert_eq!(config.analysis.max_posts, 5);
        assert_eq!(config.oracle.endpoint, claimlens_oracle::chat::DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = CliConfig::load(Some("/nonexistent/claimlens.toml"));
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
