//! Keyboard-wedge badge scan detection
//!
//! Badge and barcode scanners present themselves as keyboards and "type"
//! their payload. This crate tells such bursts apart from human typing on
//! the same key stream using keystroke timing alone.
//!
//! # Modules
//! - `scanner`: Timing classifier, finalize timer, listener lifecycle
//! - `config`: TOML configuration with defaults and validation
//! - `logging`: `fern` dispatcher setup
//! - `tally`: Per-code scan counts and repeat detection
//! - `synth`: Synthetic scanner/human keystroke streams
//! - `cli`: crossterm input and rendering for the `scanwedge` binary

pub mod cli;
pub mod config;
pub mod logging;
pub mod scanner;
pub mod synth;
pub mod tally;

pub use config::{AppConfig, ScannerConfig};
pub use scanner::{KeyOutcome, ScanClassifier, ScanKey, ScanListener, ScanState};
pub use tally::ScanTally;
