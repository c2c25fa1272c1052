//! Scan session: the characters accumulated between two resets
//!
//! Maintains:
//! - The character buffer
//! - Session start and last-event timestamps
//! - Keystroke count (always equal to the buffer length between resets)

use std::time::{Duration, Instant};

/// Ephemeral per-scan state owned by the classifier
#[derive(Clone, Debug)]
pub struct ScanSession {
    /// Characters accepted since the session started
    buffer: String,
    /// Timestamp of the first character in the session
    session_start: Option<Instant>,
    /// Characters accepted in the current session
    keystroke_count: u32,
}

impl ScanSession {
    /// Create an empty session
    pub fn new() -> Self {
        ScanSession {
            buffer: String::with_capacity(32),
            session_start: None,
            keystroke_count: 0,
        }
    }

    /// Clear buffer and count; the start time is kept until the next `begin`
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.keystroke_count = 0;
    }

    /// Clear everything and mark `now` as the session start
    pub fn restart(&mut self, now: Instant) {
        self.reset();
        self.session_start = Some(now);
    }

    /// Append one accepted character
    pub fn push(&mut self, c: char, now: Instant) {
        if self.buffer.is_empty() {
            self.restart(now);
        }
        self.buffer.push(c);
        self.keystroke_count += 1;
    }

    /// Remove the last character; no-op on an empty buffer
    pub fn pop(&mut self) -> Option<char> {
        let popped = self.buffer.pop();
        self.keystroke_count = self.keystroke_count.saturating_sub(1);
        popped
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Buffer length in characters
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn keystroke_count(&self) -> u32 {
        self.keystroke_count
    }

    pub fn session_start(&self) -> Option<Instant> {
        self.session_start
    }

    /// Buffer content with surrounding whitespace removed
    pub fn code(&self) -> &str {
        self.buffer.trim()
    }

    /// Average time per keystroke from session start up to `now`.
    /// `None` when no keystroke has been counted.
    pub fn avg_per_key(&self, now: Instant) -> Option<Duration> {
        let start = self.session_start?;
        if self.keystroke_count == 0 {
            return None;
        }
        Some(now.saturating_duration_since(start) / self.keystroke_count)
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_tracks_count() {
        let t0 = Instant::now();
        let mut session = ScanSession::new();
        session.push('A', t0);
        session.push('B', t0 + Duration::from_millis(10));
        assert_eq!(session.len(), 2);
        assert_eq!(session.keystroke_count(), 2);
        assert_eq!(session.session_start(), Some(t0));
        assert_eq!(session.code(), "AB");
    }

    #[test]
    fn test_pop_floors_at_zero() {
        let mut session = ScanSession::new();
        session.push('A', Instant::now());
        assert_eq!(session.pop(), Some('A'));
        assert_eq!(session.pop(), None);
        assert_eq!(session.keystroke_count(), 0);
        assert!(session.is_empty());
    }

    #[test]
    fn test_avg_per_key() {
        let t0 = Instant::now();
        let mut session = ScanSession::new();
        assert_eq!(session.avg_per_key(t0), None);
        session.push('1', t0);
        session.push('2', t0 + Duration::from_millis(20));
        assert_eq!(
            session.avg_per_key(t0 + Duration::from_millis(40)),
            Some(Duration::from_millis(20))
        );
    }
}
