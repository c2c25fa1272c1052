//! Logical keys as seen by the scan classifier
//!
//! Only single ASCII alphanumerics feed the buffer. Enter, Backspace,
//! Delete and Escape drive the state machine; everything else still
//! counts as activity for gap detection but is otherwise ignored.

use std::fmt;

/// One key press, reduced to what the classifier cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanKey {
    /// Single ASCII alphanumeric character
    Char(char),
    Enter,
    Backspace,
    Delete,
    Escape,
    /// Punctuation, navigation keys, chords...
    Other,
}

impl ScanKey {
    /// Classify a plain character
    pub fn from_char(c: char) -> Self {
        match c {
            '\r' | '\n' => ScanKey::Enter,
            '\u{8}' | '\u{7f}' => ScanKey::Backspace,
            '\u{1b}' => ScanKey::Escape,
            c if c.is_ascii_alphanumeric() => ScanKey::Char(c),
            _ => ScanKey::Other,
        }
    }

    /// Classify a DOM-style key identifier (`"a"`, `"Enter"`, `"Escape"`, ...)
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => ScanKey::Enter,
            "Backspace" => ScanKey::Backspace,
            "Delete" => ScanKey::Delete,
            "Escape" | "Esc" => ScanKey::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => ScanKey::Char(c),
                    _ => ScanKey::Other,
                }
            }
        }
    }

    /// Whether this key deletes the last buffered character
    pub fn is_erase(&self) -> bool {
        matches!(self, ScanKey::Backspace | ScanKey::Delete)
    }
}

impl fmt::Display for ScanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanKey::Char(c) => write!(f, "{}", c),
            ScanKey::Enter => f.write_str("Enter"),
            ScanKey::Backspace => f.write_str("Backspace"),
            ScanKey::Delete => f.write_str("Delete"),
            ScanKey::Escape => f.write_str("Escape"),
            ScanKey::Other => f.write_str("Other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ScanKey::from_name("7"), ScanKey::Char('7'));
        assert_eq!(ScanKey::from_name("Z"), ScanKey::Char('Z'));
        assert_eq!(ScanKey::from_name("Enter"), ScanKey::Enter);
        assert_eq!(ScanKey::from_name("Delete"), ScanKey::Delete);
        assert_eq!(ScanKey::from_name("Shift"), ScanKey::Other);
        assert_eq!(ScanKey::from_name("-"), ScanKey::Other);
        assert_eq!(ScanKey::from_name("ж"), ScanKey::Other);
    }

    #[test]
    fn test_from_char() {
        assert_eq!(ScanKey::from_char('\r'), ScanKey::Enter);
        assert_eq!(ScanKey::from_char('\u{1b}'), ScanKey::Escape);
        assert_eq!(ScanKey::from_char(' '), ScanKey::Other);
        assert!(ScanKey::from_char('\u{7f}').is_erase());
    }
}
