//! Keystroke input handling using crossterm
//!
//! Features:
//! - Non-blocking keystroke capture with a caller-bounded wait
//! - Mapping of terminal key events onto classifier keys
//! - Ctrl+C graceful exit (Escape belongs to the classifier)

use crate::scanner::ScanKey;
use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Result as IoResult;
use std::time::Duration;

/// Handles user input from terminal
pub struct InputHandler {
    /// Longest time a single poll may block
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create new input handler with default timeout (50ms for responsive input)
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Enable raw mode for terminal input
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Wait at most `until_deadline` (capped at the poll timeout) for a key press.
    /// Returns Some(KeyEvent) if key pressed, None if timeout
    pub fn read_key(
        &self,
        until_deadline: Option<Duration>,
    ) -> Result<Option<KeyEvent>, Box<dyn std::error::Error>> {
        let wait = until_deadline
            .map(|d| d.min(self.poll_timeout))
            .unwrap_or(self.poll_timeout);
        if event::poll(wait)? {
            match event::read()? {
                // Release/repeat events would double-count keystrokes
                event::Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    Ok(Some(key_event))
                }
                _ => Ok(None),
            }
        } else {
            Ok(None)
        }
    }

    /// Check if key event is an exit signal (Ctrl+C)
    pub fn is_exit(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL))
    }

    /// Convert a terminal key event into a classifier key
    pub fn to_scan_key(key: &KeyEvent) -> ScanKey {
        match key.code {
            KeyCode::Char(c) => {
                // Chords are never part of a scan
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(KeyModifiers::ALT)
                {
                    ScanKey::Other
                } else {
                    ScanKey::from_char(c)
                }
            }
            KeyCode::Enter => ScanKey::Enter,
            KeyCode::Backspace => ScanKey::Backspace,
            KeyCode::Delete => ScanKey::Delete,
            KeyCode::Esc => ScanKey::Escape,
            _ => ScanKey::Other,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_scan_key() {
        let plain = KeyEvent::new(KeyCode::Char('7'), KeyModifiers::NONE);
        assert_eq!(InputHandler::to_scan_key(&plain), ScanKey::Char('7'));

        let shifted = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(InputHandler::to_scan_key(&shifted), ScanKey::Char('Q'));

        let chord = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::to_scan_key(&chord), ScanKey::Other);

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(InputHandler::to_scan_key(&esc), ScanKey::Escape);

        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(InputHandler::to_scan_key(&tab), ScanKey::Other);
    }

    #[test]
    fn test_is_exit() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(InputHandler::is_exit(&ctrl_c));
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!InputHandler::is_exit(&esc));
    }
}
