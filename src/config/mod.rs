//! Configuration: classifier tunables and logging
//!
//! # Components
//! - `model.rs`: TOML-facing structures with defaults and validation
//! - `loader.rs`: Reads the config file and applies it

pub mod loader;
pub mod model;

pub use loader::load_config;
pub use model::{AppConfig, ConfigError, LoggingConfig, ScannerConfig};
