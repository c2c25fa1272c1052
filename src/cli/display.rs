//! Terminal display and UI rendering
//!
//! Features:
//! - Classifier settings banner
//! - Live classifier state (idle / accumulating)
//! - Last scan with new/repeat color coding
//! - Running tally and recent scans

use crate::config::ScannerConfig;
use crate::scanner::ScanState;
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};

/// How many recent scans fit on the recent line
const RECENT_SHOWN: usize = 5;

/// Terminal display manager
pub struct Display {
    /// Whether raw mode should be restored on shutdown
    restore_raw_mode: bool,
}

impl Display {
    /// Create display without alternate screen (simpler mode)
    pub fn simple() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Display {
            restore_raw_mode: true,
        })
    }

    /// Clear screen
    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Render the title and active thresholds
    pub fn show_banner(&self, config: &ScannerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Cyan),
            Print("scanwedge"),
            ResetColor,
            Print(" | badge scan detection"),
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::DarkGrey),
            Print(format!(
                "length {}-{}  |  finalize after {}ms  |  {}",
                config.min_length,
                config.max_length,
                config.idle_reset_ms,
                if config.enabled { "enabled" } else { "DISABLED" }
            )),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Show whether a scan is being accumulated
    pub fn show_status(
        &self,
        state: ScanState,
        buffered: usize,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        let (color, label) = match state {
            ScanState::Idle => (Color::DarkGrey, "idle".to_string()),
            ScanState::Accumulating => (Color::Yellow, format!("reading ({} chars)", buffered)),
        };

        execute!(
            stdout,
            cursor::MoveTo(0, 3),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Magenta),
            Print("Status: "),
            SetForegroundColor(color),
            Print(label),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Show the latest recognized code
    /// Green for a first check-in, Yellow for a repeat
    pub fn show_last_scan(&self, code: &str, seen: u32) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        let (color, tag) = if seen > 1 {
            (Color::Yellow, format!("REPEAT x{}", seen))
        } else {
            (Color::Green, "NEW".to_string())
        };

        execute!(
            stdout,
            cursor::MoveTo(0, 5),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Cyan),
            Print("Last scan: "),
            ResetColor,
            Print(code),
            Print("  "),
            SetForegroundColor(color),
            Print(tag),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Display running totals and the most recent codes
    pub fn show_tally(
        &self,
        total: u32,
        unique: usize,
        recent: &[String],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        let shown = &recent[recent.len().saturating_sub(RECENT_SHOWN)..];

        execute!(
            stdout,
            cursor::MoveTo(0, 6),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Blue),
            Print(format!("Scans: {}  |  Unique: {}", total, unique)),
            ResetColor,
            cursor::MoveTo(0, 7),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("Recent: {}", shown.join(", "))),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Show help text
    pub fn show_help(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        execute!(
            stdout,
            cursor::MoveTo(0, 9),
            SetForegroundColor(Color::DarkGrey),
            Print("Scan a badge  |  ESC to discard input  |  Ctrl+C to exit"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(stdout, cursor::MoveTo(0, 11), cursor::Show)?;

        if self.restore_raw_mode {
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Display {
            restore_raw_mode: true,
        }
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}
