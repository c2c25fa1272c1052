//! scanwedge - badge scan detection at the front desk
//!
//! Reads raw key events from the terminal, classifies them by timing and
//! prints every recognized badge code with a running tally.

use clap::Parser;
use scanwedge::cli::{Display, InputHandler};
use scanwedge::config::{load_config, AppConfig};
use scanwedge::logging::{setup_logging, Console};
use scanwedge::{ScanListener, ScanTally};
use std::cell::RefCell;
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "scanwedge")]
#[command(about = "Detect keyboard-wedge badge scans from keystroke timing")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum accepted code length
    #[arg(long)]
    min_length: Option<usize>,

    /// Maximum accepted code length
    #[arg(long)]
    max_length: Option<usize>,

    /// Finalize timeout after the last keystroke (ms)
    #[arg(long)]
    idle_reset_ms: Option<u64>,

    /// Start with the classifier disabled
    #[arg(long)]
    disabled: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Log file (default: scanwedge.log)
    #[arg(long)]
    log_file: Option<String>,

    /// Enable debug mode (debug-level logging)
    #[arg(short, long)]
    debug: bool,
}

/// Command-line values win over the config file
fn apply_overrides(cfg: &mut AppConfig, args: &Args) {
    if let Some(min_length) = args.min_length {
        cfg.scanner.min_length = min_length;
    }
    if let Some(max_length) = args.max_length {
        cfg.scanner.max_length = max_length;
    }
    if let Some(idle_reset_ms) = args.idle_reset_ms {
        cfg.scanner.idle_reset_ms = idle_reset_ms;
    }
    if args.disabled {
        cfg.scanner.enabled = false;
    }
    if let Some(level) = &args.log_level {
        cfg.logging.level = level.clone();
    }
    if args.debug {
        cfg.logging.level = "DEBUG".into();
    }
    if let Some(file) = &args.log_file {
        cfg.logging.enable = true;
        cfg.logging.file = Some(file.clone());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut cfg = load_config(args.config.as_deref())?;
    apply_overrides(&mut cfg, &args);
    cfg.scanner.validate()?;

    setup_logging(&cfg.logging, Some("scanwedge.log"), Console::Silent)?;
    log::info!(
        "scanwedge starting: length {}-{}, finalize {}ms, enabled={}",
        cfg.scanner.min_length,
        cfg.scanner.max_length,
        cfg.scanner.idle_reset_ms,
        cfg.scanner.enabled
    );

    // Scans land here from the callback and are drained by the loop
    let pending: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&pending);

    let mut listener = ScanListener::new(cfg.scanner.clone());
    listener.install(move |code: &str| sink.borrow_mut().push(code.to_string()));

    let mut tally = ScanTally::new();

    let display = Display::simple()?;
    InputHandler::enable_raw_mode()?;
    let input = InputHandler::new();

    display.clear()?;
    display.show_banner(&cfg.scanner)?;
    display.show_tally(0, 0, &[])?;
    display.show_help()?;

    // Event loop
    'session: loop {
        let classifier = listener.classifier();
        display.show_status(classifier.state(), classifier.keystroke_count() as usize)?;

        let until_deadline = listener
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()));

        if let Some(key) = input.read_key(until_deadline)? {
            if InputHandler::is_exit(&key) {
                break 'session;
            }

            let now = Instant::now();
            // A timer that expired while we were blocked fires before this key
            listener.poll(now);
            let scan_key = InputHandler::to_scan_key(&key);
            if listener.handle_key(scan_key, now) {
                log::trace!("suppressed default effect of {}", scan_key);
            }
        }

        listener.poll(Instant::now());

        let scans: Vec<String> = pending.borrow_mut().drain(..).collect();
        for code in scans {
            let seen = tally.record(&code);
            if seen > 1 {
                log::warn!("repeat scan {} (seen {} times)", code, seen);
            } else {
                log::info!("scan {}", code);
            }
            display.show_last_scan(&code, seen)?;
            display.show_tally(tally.total_scans(), tally.unique_codes(), tally.recent())?;
        }
    }

    // Cleanup
    listener.uninstall();
    InputHandler::disable_raw_mode()?;
    display.shutdown()?;

    // Summary
    let summary = tally.summary();
    println!();
    println!(
        "Session complete: {} scans | {} unique codes",
        summary.total_scans, summary.unique_codes
    );
    if !summary.repeated.is_empty() {
        println!("Repeated codes:");
        for (code, count) in &summary.repeated {
            println!("  {} x{}", code, count);
        }
    }
    log::info!("scanwedge stopped after {} scans", summary.total_scans);

    Ok(())
}
