//! Configuration for the analysis pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`AnalysisPipeline`](crate::AnalysisPipeline)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Maximum posts to fetch per run
    pub max_posts: usize,

    /// Maximum time for a single oracle call (seconds)
    ///
    /// A timed-out call is treated as an oracle failure and falls back per
    /// the stage it happened in.
    pub oracle_timeout_secs: u64,

    /// Maximum classification calls in flight at once
    pub max_concurrent_classifications: usize,
}

impl AnalysisConfig {
    /// Get the oracle timeout as a Duration
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_posts == 0 {
            return Err("max_posts must be greater than 0".to_string());
        }
        if self.oracle_timeout_secs == 0 {
            return Err("oracle_timeout_secs must be greater than 0".to_string());
        }
        if self.max_concurrent_classifications == 0 {
            return Err("max_concurrent_classifications must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalysisConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_posts: 20,
            oracle_timeout_secs: 60,
            max_concurrent_classifications: 4,
        }
    }
}
