//! Scan detection: keystroke timing classifier and its lifecycle
//!
//! # Components
//! - `key.rs`: Logical keys (alphanumerics and the four control keys)
//! - `session.rs`: Buffer and timestamps of the current scan session
//! - `timer.rs`: Single cancellable finalize deadline
//! - `classifier.rs`: The state machine and its timing thresholds
//! - `listener.rs`: Install/uninstall wrapper that owns the `on_scan` callback

pub mod classifier;
pub mod key;
pub mod listener;
pub mod session;
pub mod timer;

pub use classifier::{
    KeyOutcome, ScanClassifier, ScanState, ACCEPT_PER_KEY, FAST_PATH_PER_KEY, SESSION_GAP,
};
pub use key::ScanKey;
pub use listener::ScanListener;
pub use session::ScanSession;
pub use timer::FinalizeTimer;
