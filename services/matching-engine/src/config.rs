//! Engine configuration
//!
//! Loaded from a TOML file at startup; every knob has a default so a
//! missing file section falls back to sane values.
//!
//! ```toml
//! [engine]
//! max_price_deviation = 10
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSettings,
}

/// Settings of the matching engine itself
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Allowed deal-price deviation from the post-auction price, percent
    #[serde(default = "default_max_price_deviation")]
    pub max_price_deviation: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_price_deviation: default_max_price_deviation(),
        }
    }
}

fn default_max_price_deviation() -> u64 {
    10
}

impl Config {
    /// Load the configuration from a TOML file
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_engine_section() {
        let config: Config = toml::from_str("[engine]\nmax_price_deviation = 25\n").unwrap();
        assert_eq!(config.engine.max_price_deviation, 25);
    }

    #[test]
    fn test_missing_section_falls_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.engine.max_price_deviation, 10);
    }

    #[test]
    fn test_missing_key_falls_back_to_default() {
        let config: Config = toml::from_str("[engine]\n").unwrap();
        assert_eq!(config.engine.max_price_deviation, 10);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = Config::from_toml("/nonexistent/config.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = std::env::temp_dir().join("matching-engine-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[engine\nmax_price_deviation = ").unwrap();

        let result = Config::from_toml(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
