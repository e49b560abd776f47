//! Report configuration
//!
//! Optional JSON file; every field falls back to its default.
//!
//! ```json
//! { "loader": { "max_car_year": 2024 }, "pipeline": { "leaderboard_size": 15 } }
//! ```

use std::path::Path;

use sales_analytics::PipelineConfig;
use sales_types::record::LoaderConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub loader: LoaderConfig,
    pub pipeline: PipelineConfig,
}

impl ReportConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ReportConfig::from_json(r#"{"pipeline": {"model_year_size": 3}}"#).unwrap();
        assert_eq!(config.pipeline.model_year_size, 3);
        assert_eq!(config.pipeline.leaderboard_size, 10);
        assert_eq!(config.loader.min_car_year, 1886);
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = ReportConfig::from_json("{}").unwrap();
        assert_eq!(config.pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(ReportConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
