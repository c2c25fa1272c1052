//! # Listener Flow Tests
//!
//! Drives the public `ScanListener` API with timed key streams and checks
//! what reaches the `on_scan` callback.

use scanwedge::synth::{self, TimedKey};
use scanwedge::{ScanKey, ScanListener, ScannerConfig};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn installed(config: ScannerConfig) -> (ScanListener, Rc<RefCell<Vec<String>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut listener = ScanListener::new(config);
    listener.install(move |code: &str| sink.borrow_mut().push(code.to_string()));
    (listener, seen)
}

fn keys(events: &[(u64, &str)]) -> Vec<TimedKey> {
    events.iter()
        .map(|&(ms, name)| TimedKey {
            offset: Duration::from_millis(ms),
            key: ScanKey::from_name(name),
        })
        .collect()
}

#[test]
fn test_fast_scan_fires_once() {
    let (mut listener, seen) = installed(ScannerConfig::default());
    synth::replay(
        &mut listener,
        Instant::now(),
        &keys(&[(0, "A"), (10, "B"), (20, "C")]),
    );
    assert_eq!(*seen.borrow(), vec!["ABC".to_string()]);
}

#[test]
fn test_pause_splits_session_and_enter_rejects() {
    let (mut listener, seen) = installed(ScannerConfig::default());
    synth::replay(
        &mut listener,
        Instant::now(),
        &keys(&[(0, "A"), (10, "B"), (510, "C"), (520, "Enter")]),
    );
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_enter_prevents_default_only_mid_scan() {
    let (mut listener, seen) = installed(ScannerConfig {
        min_length: 4,
        ..ScannerConfig::default()
    });
    let t0 = Instant::now();
    assert!(!listener.handle_key(ScanKey::Enter, t0));

    for (i, c) in "7731".chars().enumerate() {
        listener.handle_key(ScanKey::Char(c), t0 + Duration::from_millis(60 * (i as u64 + 1)));
    }
    assert!(listener.handle_key(ScanKey::Enter, t0 + Duration::from_millis(280)));
    assert_eq!(*seen.borrow(), vec!["7731".to_string()]);
}

#[test]
fn test_escape_discards_scan_in_progress() {
    let (mut listener, seen) = installed(ScannerConfig::default());
    synth::replay(
        &mut listener,
        Instant::now(),
        &keys(&[(0, "Q"), (60, "W"), (120, "Escape"), (180, "Enter")]),
    );
    assert!(seen.borrow().is_empty());
    assert_eq!(listener.next_deadline(), None);
}

#[test]
fn test_disabled_listener_never_reports() {
    let (mut listener, seen) = installed(ScannerConfig {
        enabled: false,
        ..ScannerConfig::default()
    });
    synth::replay(
        &mut listener,
        Instant::now(),
        &keys(&[(0, "A"), (5, "B"), (10, "C"), (15, "Enter")]),
    );
    assert!(seen.borrow().is_empty());
    assert_eq!(listener.classifier().buffer(), "");
}

#[test]
fn test_drop_releases_pending_timer() {
    let (mut listener, seen) = installed(ScannerConfig::default());
    let t0 = Instant::now();
    listener.handle_key(ScanKey::Char('Z'), t0);
    assert!(listener.next_deadline().is_some());
    drop(listener);
    assert_eq!(Rc::strong_count(&seen), 1);
}
