//! Scan listener: lifecycle around the classifier and its callback
//!
//! `install` subscribes an `on_scan` callback; `uninstall` (also run on
//! drop) cancels the pending finalize timer and clears the session so
//! no stale timer can fire against a torn-down consumer.

use super::classifier::ScanClassifier;
use super::key::ScanKey;
use crate::config::ScannerConfig;
use std::time::Instant;

type ScanCallback = Box<dyn FnMut(&str)>;

pub struct ScanListener {
    classifier: ScanClassifier,
    on_scan: Option<ScanCallback>,
}

impl ScanListener {
    /// Create an uninstalled listener
    pub fn new(config: ScannerConfig) -> Self {
        ScanListener {
            classifier: ScanClassifier::new(config),
            on_scan: None,
        }
    }

    /// Subscribe `on_scan`, replacing any previous subscription
    pub fn install<F>(&mut self, on_scan: F)
    where
        F: FnMut(&str) + 'static,
    {
        if self.is_installed() {
            self.uninstall();
        }
        self.on_scan = Some(Box::new(on_scan));
        log::debug!("scan listener installed");
    }

    /// Drop the callback and release the pending timer
    pub fn uninstall(&mut self) {
        self.classifier.reset();
        if self.on_scan.take().is_some() {
            log::debug!("scan listener uninstalled");
        }
    }

    pub fn is_installed(&self) -> bool {
        self.on_scan.is_some()
    }

    pub fn classifier(&self) -> &ScanClassifier {
        &self.classifier
    }

    /// Feed a key event. Returns `true` when its default effect must be
    /// suppressed (Enter that closed a scan in progress).
    pub fn handle_key(&mut self, key: ScanKey, now: Instant) -> bool {
        if !self.is_installed() {
            return false;
        }
        let outcome = self.classifier.handle_key(key, now);
        if let Some(code) = outcome.scan {
            self.emit(&code);
        }
        outcome.prevent_default
    }

    /// Fire the finalize timer if due
    pub fn poll(&mut self, now: Instant) {
        if !self.is_installed() {
            return;
        }
        if let Some(code) = self.classifier.poll(now) {
            self.emit(&code);
        }
    }

    /// Deadline of the pending finalize timer, for bounding event-loop waits
    pub fn next_deadline(&self) -> Option<Instant> {
        self.classifier.next_deadline()
    }

    fn emit(&mut self, code: &str) {
        if let Some(on_scan) = self.on_scan.as_mut() {
            on_scan(code);
        }
    }
}

impl Drop for ScanListener {
    fn drop(&mut self) {
        self.uninstall();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |code: &str| sink.borrow_mut().push(code.to_string()))
    }

    #[test]
    fn test_uninstalled_listener_ignores_keys() {
        let mut listener = ScanListener::new(ScannerConfig::default());
        let t0 = Instant::now();
        listener.handle_key(ScanKey::Char('A'), t0);
        assert_eq!(listener.classifier().buffer(), "");
        assert_eq!(listener.next_deadline(), None);
    }

    #[test]
    fn test_callback_receives_scan() {
        let (seen, on_scan) = recorder();
        let mut listener = ScanListener::new(ScannerConfig::default());
        listener.install(on_scan);
        let t0 = Instant::now();
        for (i, c) in "QRS".chars().enumerate() {
            listener.handle_key(ScanKey::Char(c), t0 + Duration::from_millis(8 * i as u64));
        }
        assert_eq!(*seen.borrow(), vec!["QRS".to_string()]);
    }

    #[test]
    fn test_uninstall_cancels_timer() {
        let (seen, on_scan) = recorder();
        let mut listener = ScanListener::new(ScannerConfig {
            idle_reset_ms: 50,
            ..ScannerConfig::default()
        });
        listener.install(on_scan);
        let t0 = Instant::now();
        for (i, c) in "0123456789".chars().enumerate() {
            listener.handle_key(ScanKey::Char(c), t0 + Duration::from_millis(48 * i as u64));
        }
        assert!(listener.next_deadline().is_some());
        listener.uninstall();
        assert_eq!(listener.next_deadline(), None);
        listener.poll(t0 + Duration::from_secs(5));
        assert!(seen.borrow().is_empty());
    }
}
