// src/config/model.rs

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Top-level config as deserialized from TOML
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Mirror of the `[scanner]` table; every field is optional in the file
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScannerConfig {
    /// When false, every key event is ignored
    pub enabled: bool,
    /// Minimum accepted code length
    pub min_length: usize,
    /// Maximum accepted code length, also the overflow threshold
    pub max_length: usize,
    /// Finalize timeout after the last keystroke (milliseconds)
    pub idle_reset_ms: u64,
}

impl ScannerConfig {
    pub fn idle_reset(&self) -> Duration {
        Duration::from_millis(self.idle_reset_ms)
    }

    /// Reject bounds the classifier cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length == 0 {
            return Err(ConfigError::InvalidBounds(
                "min_length must be at least 1".into(),
            ));
        }
        if self.min_length > self.max_length {
            return Err(ConfigError::InvalidBounds(format!(
                "min_length {} exceeds max_length {}",
                self.min_length, self.max_length
            )));
        }
        if self.idle_reset_ms == 0 {
            return Err(ConfigError::InvalidBounds(
                "idle_reset_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            enabled: true,
            min_length: 3,
            max_length: 20,
            idle_reset_ms: 300,
        }
    }
}

/// Mirror of the `[logging]` table
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_enable")]
    pub enable: bool,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_level")]
    pub level: String,
}
fn default_enable() -> bool { true }
fn default_level() -> String { "INFO".into() }

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            enable: default_enable(),
            file: None,
            level: default_level(),
        }
    }
}

/// All the ways config loading can go wrong
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid scanner bounds: {0}")]
    InvalidBounds(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ScannerConfig::default();
        assert!(cfg.enabled);
        assert_eq!((cfg.min_length, cfg.max_length), (3, 20));
        assert_eq!(cfg.idle_reset(), Duration::from_millis(300));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let cfg: AppConfig = toml::from_str("[scanner]\nmin_length = 6\n").unwrap();
        assert_eq!(cfg.scanner.min_length, 6);
        assert_eq!(cfg.scanner.max_length, 20);
        assert_eq!(cfg.logging.level, "INFO");
    }

    #[test]
    fn test_validate_rejects_bad_bounds() {
        let inverted = ScannerConfig {
            min_length: 10,
            max_length: 5,
            ..ScannerConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvalidBounds(_))
        ));

        let zero = ScannerConfig {
            min_length: 0,
            ..ScannerConfig::default()
        };
        assert!(zero.validate().is_err());

        let no_timeout = ScannerConfig {
            idle_reset_ms: 0,
            ..ScannerConfig::default()
        };
        assert!(no_timeout.validate().is_err());
    }
}
