//! CLI Interface: terminal key capture and rendering
//!
//! # Components
//! - `input.rs`: Keystroke capture using crossterm
//! - `display.rs`: Terminal rendering of scans and tally

pub mod display;
pub mod input;

pub use display::Display;
pub use input::InputHandler;
