//! Keystroke scan classifier
//!
//! Splits a shared key stream into human typing and machine-driven badge
//! scans using inter-keystroke timing. A scanner "types" its payload in a
//! fast burst; people don't.
//!
//! Three timing thresholds drive the decisions and are kept separate:
//! - [`SESSION_GAP`]: a pause this long starts a new session
//! - [`FAST_PATH_PER_KEY`]: bursts faster than this emit immediately
//! - [`ACCEPT_PER_KEY`]: the finalize timer only accepts sessions faster than this
//!
//! All methods take the current instant explicitly, so the classifier is
//! driven the same way by a terminal event loop, the simulator and tests.

use super::key::ScanKey;
use super::session::ScanSession;
use super::timer::FinalizeTimer;
use crate::config::ScannerConfig;
use std::time::{Duration, Instant};

/// Inactivity gap that separates two unrelated keystroke bursts
pub const SESSION_GAP: Duration = Duration::from_millis(200);

/// Average speed under which a burst is emitted without waiting for the timer
pub const FAST_PATH_PER_KEY: Duration = Duration::from_millis(30);

/// Average speed the finalize timer requires to accept a session
pub const ACCEPT_PER_KEY: Duration = Duration::from_millis(50);

/// Classifier state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// Buffer empty
    Idle,
    /// Buffer non-empty, finalize timer normally pending
    Accumulating,
}

/// Result of feeding one key event
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Recognized code, if this key completed a scan
    pub scan: Option<String>,
    /// The key's default effect should be suppressed
    pub prevent_default: bool,
}

impl KeyOutcome {
    fn emitted(scan: Option<String>) -> Self {
        KeyOutcome {
            scan,
            prevent_default: false,
        }
    }
}

/// Timing-based scan detector over a single key stream
#[derive(Clone, Debug)]
pub struct ScanClassifier {
    config: ScannerConfig,
    session: ScanSession,
    timer: FinalizeTimer,
    /// Arrival time of the previous event of any kind
    last_event: Option<Instant>,
}

impl ScanClassifier {
    pub fn new(config: ScannerConfig) -> Self {
        ScanClassifier {
            config,
            session: ScanSession::new(),
            timer: FinalizeTimer::new(),
            last_event: None,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn state(&self) -> ScanState {
        if self.session.is_empty() {
            ScanState::Idle
        } else {
            ScanState::Accumulating
        }
    }

    /// Characters accumulated in the current session
    pub fn buffer(&self) -> &str {
        self.session.code()
    }

    pub fn keystroke_count(&self) -> u32 {
        self.session.keystroke_count()
    }

    /// When the pending finalize timer fires, if one is armed
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Feed one key event that arrived at `now`
    pub fn handle_key(&mut self, key: ScanKey, now: Instant) -> KeyOutcome {
        if !self.config.enabled {
            return KeyOutcome::default();
        }

        if let Some(last) = self.last_event {
            if now.saturating_duration_since(last) > SESSION_GAP {
                if !self.session.is_empty() {
                    log::trace!(
                        "gap of {:?} dropped partial buffer ({} chars)",
                        now.saturating_duration_since(last),
                        self.session.len()
                    );
                }
                self.reset();
                self.session.restart(now);
            }
        }
        self.last_event = Some(now);

        log::trace!("key {} (buffer {} chars)", key, self.session.len());

        match key {
            ScanKey::Char(c) => KeyOutcome::emitted(self.on_char(c, now)),
            ScanKey::Enter => self.on_enter(),
            ScanKey::Backspace | ScanKey::Delete => {
                self.session.pop();
                KeyOutcome::default()
            }
            ScanKey::Escape => {
                self.reset();
                KeyOutcome::default()
            }
            ScanKey::Other => KeyOutcome::default(),
        }
    }

    /// Fire the finalize timer if it is due at `now`
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.timer.take_due(now) {
            self.finalize(now)
        } else {
            None
        }
    }

    /// Evaluate the accept predicate at `now`, then clear the session
    /// whatever the outcome
    pub fn finalize(&mut self, now: Instant) -> Option<String> {
        self.cancel_timer();
        let scan = if self.accepts(now) {
            Some(self.session.code().to_string())
        } else {
            if !self.session.is_empty() {
                log::debug!(
                    "finalize rejected {} chars (avg {:?}/key)",
                    self.session.len(),
                    self.session.avg_per_key(now)
                );
            }
            None
        };
        self.session.reset();
        if let Some(code) = &scan {
            log::debug!("scan accepted on finalize: {}", code);
        }
        scan
    }

    /// Accept predicate used by the finalize timer
    pub fn accepts(&self, now: Instant) -> bool {
        let min_length = self.config.min_length as u32;
        self.within_bounds(self.session.code().chars().count())
            && self.session.keystroke_count() >= min_length
            && self
                .session
                .avg_per_key(now)
                .is_some_and(|avg| avg < ACCEPT_PER_KEY)
    }

    /// Clear the session and cancel any pending timer, without emitting
    pub fn reset(&mut self) {
        self.cancel_timer();
        self.session.reset();
    }

    pub fn cancel_timer(&mut self) {
        self.timer.cancel();
    }

    /// Replace any pending finalize timer with a fresh one
    pub fn arm_timer(&mut self, now: Instant) {
        self.timer.arm(now, self.config.idle_reset());
    }

    fn within_bounds(&self, len: usize) -> bool {
        len >= self.config.min_length && len <= self.config.max_length
    }

    fn on_char(&mut self, c: char, now: Instant) -> Option<String> {
        self.session.push(c, now);
        self.arm_timer(now);

        let len = self.session.len();
        let fast = self
            .session
            .avg_per_key(now)
            .is_some_and(|avg| avg < FAST_PATH_PER_KEY);

        if len >= self.config.min_length && fast {
            self.cancel_timer();
            let scan = self.take_if_within_bounds();
            self.session.reset();
            if let Some(code) = &scan {
                log::debug!("scan accepted on fast path: {}", code);
            }
            return scan;
        }

        if len > self.config.max_length {
            log::debug!("buffer overflow at {} chars, discarding", len);
            self.reset();
        }
        None
    }

    fn on_enter(&mut self) -> KeyOutcome {
        if self.session.is_empty() {
            return KeyOutcome::default();
        }
        self.cancel_timer();
        let scan = self.take_if_within_bounds();
        match &scan {
            Some(code) => log::debug!("scan accepted on enter: {}", code),
            None => log::debug!("enter rejected {} chars", self.session.len()),
        }
        self.session.reset();
        KeyOutcome {
            scan,
            prevent_default: true,
        }
    }

    fn take_if_within_bounds(&self) -> Option<String> {
        let code = self.session.code();
        self.within_bounds(code.chars().count())
            .then(|| code.to_string())
    }
}

impl Default for ScanClassifier {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}
