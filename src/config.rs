//! Ranking configuration
//!
//! The strategy and start rank are plain data and can be kept in JSON, TOML
//! or YAML alongside the rest of an application's settings:
//!
//! ```toml
//! strategy = "dense"
//! start = 1
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rank::Rank;
use crate::strategy::Strategy;

/// Strategy and start rank for a [`Ranking`](crate::Ranking)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Tie-breaking strategy; custom strategies cannot be serialized
    pub strategy: Strategy,
    /// Rank of the first value
    pub start: Rank,
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            strategy: Strategy::Competition,
            start: Rank::Integer(0),
        }
    }
}

impl RankingConfig {
    /// Parses a JSON configuration
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parses a TOML configuration
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Parses a YAML configuration
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Loads a configuration file, choosing the format by extension
    /// (`json`, `toml`, `yaml` or `yml`)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let contents = fs::read_to_string(path)?;
        let config = match extension.as_str() {
            "json" => Self::from_json_str(&contents)?,
            "toml" => Self::from_toml_str(&contents)?,
            "yaml" | "yml" => Self::from_yaml_str(&contents)?,
            _ => {
                return Err(Error::Config(format!(
                    "unsupported configuration format: {}",
                    path.display()
                )))
            }
        };
        log::debug!(
            "loaded ranking configuration from {}: {} from rank {}",
            path.display(),
            config.strategy,
            config.start
        );
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for RankingConfig
pub struct RankingConfigBuilder {
    config: RankingConfig,
}

impl RankingConfigBuilder {
    /// Creates a new builder
    pub fn new() -> Self {
        RankingConfigBuilder {
            config: RankingConfig::default(),
        }
    }

    /// Sets the strategy
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Sets the strategy by name, e.g. `"dense"` or `"1334"`
    pub fn strategy_name(mut self, name: &str) -> Result<Self> {
        self.config.strategy = name.parse()?;
        Ok(self)
    }

    /// Sets the start rank
    pub fn start(mut self, start: impl Into<Rank>) -> Self {
        self.config.start = start.into();
        self
    }

    /// Builds the config
    pub fn build(self) -> RankingConfig {
        self.config
    }
}

impl Default for RankingConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
