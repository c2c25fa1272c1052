// src/config/loader.rs

//! # Configuration Loader
//!
//! Reads a TOML file into `AppConfig` and validates the scanner bounds.
//! A missing path yields the built-in defaults.

use crate::config::model::{AppConfig, ConfigError};
use std::{fs, path::Path};

/// Load and validate the configuration at `path`, or defaults when `None`.
/// Logs at DEBUG before reading and INFO on success.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let cfg = match path {
        Some(path) => {
            log::debug!("Reading config from {:?}", path);
            let txt = fs::read_to_string(path)?;
            let cfg: AppConfig = toml::from_str(&txt)?;
            log::info!("Loaded config from {:?}", path);
            cfg
        }
        None => AppConfig::default(),
    };
    cfg.scanner.validate()?;
    Ok(cfg)
}
