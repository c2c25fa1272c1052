//! Detection-rate simulator for the scan classifier
//!
//! Replays synthetic badge-scanner bursts and human typing through the
//! classifier on a virtual clock and reports what was recognized.
//! Usage: cargo run --bin simulate -- --trials 500 --code-length 8 --enter

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scanwedge::config::{LoggingConfig, ScannerConfig};
use scanwedge::logging::{setup_logging, Console};
use scanwedge::synth::{self, HUMAN_DELAY_MS, SCANNER_DELAY_MS};
use scanwedge::ScanListener;
use serde::Serialize;
use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "scanwedge simulate")]
#[command(about = "Measure scan detection on synthetic keystroke streams")]
struct Args {
    /// Number of scanner and human trials each
    #[arg(short, long, default_value = "100")]
    trials: usize,

    /// Length of generated codes and typed words
    #[arg(short = 'l', long, default_value = "8")]
    code_length: usize,

    /// Terminate scanner bursts with Enter
    #[arg(short, long)]
    enter: bool,

    /// Minimum accepted code length
    #[arg(long, default_value = "3")]
    min_length: usize,

    /// Maximum accepted code length
    #[arg(long, default_value = "20")]
    max_length: usize,

    /// Finalize timeout (ms)
    #[arg(long, default_value = "300")]
    idle_reset_ms: u64,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long)]
    verbose: bool,
}

/// Outcome counts for scanner bursts
#[derive(Debug, Default, Serialize)]
struct ScannerOutcomes {
    /// Recognized as exactly the generated code
    exact: usize,
    /// Recognized, but split or truncated
    fragmented: usize,
    /// Nothing recognized
    missed: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    trials: usize,
    code_length: usize,
    with_enter: bool,
    config: ScannerConfig,
    scanner: ScannerOutcomes,
    human_false_positives: usize,
}

/// Replay one stream and collect everything the listener emitted
fn run_stream(
    listener: &mut ScanListener,
    seen: &Rc<RefCell<Vec<String>>>,
    start: Instant,
    stream: &[synth::TimedKey],
) -> (Vec<String>, Instant) {
    let end = synth::replay(listener, start, stream);
    let emitted = seen.borrow_mut().drain(..).collect();
    (emitted, end)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let logging = LoggingConfig {
        enable: args.verbose,
        file: None,
        level: "DEBUG".into(),
    };
    setup_logging(&logging, None, Console::Stderr)?;

    let config = ScannerConfig {
        enabled: true,
        min_length: args.min_length,
        max_length: args.max_length,
        idle_reset_ms: args.idle_reset_ms,
    };
    config.validate()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut listener = ScanListener::new(config.clone());
    listener.install(move |code: &str| sink.borrow_mut().push(code.to_string()));

    // Trials are separated by a pause well past the session gap
    let spacing = Duration::from_secs(1);
    let mut clock = Instant::now();

    let mut scanner = ScannerOutcomes::default();
    for trial in 0..args.trials {
        let code = synth::random_code(&mut rng, args.code_length);
        let stream = synth::scanner_burst(&code, &mut rng, SCANNER_DELAY_MS, args.enter);
        let (emitted, end) = run_stream(&mut listener, &seen, clock, &stream);
        clock = end + spacing;

        match emitted.as_slice() {
            [] => scanner.missed += 1,
            [single] if *single == code => scanner.exact += 1,
            _ => scanner.fragmented += 1,
        }
        log::debug!("scanner trial {}: {} -> {:?}", trial, code, emitted);
    }

    let mut human_false_positives = 0;
    for trial in 0..args.trials {
        let word = synth::random_code(&mut rng, args.code_length);
        let stream = synth::human_typing(&word, &mut rng, HUMAN_DELAY_MS);
        let (emitted, end) = run_stream(&mut listener, &seen, clock, &stream);
        clock = end + spacing;

        if !emitted.is_empty() {
            human_false_positives += 1;
            log::debug!("human trial {}: {} -> {:?}", trial, word, emitted);
        }
    }

    listener.uninstall();

    let report = Report {
        trials: args.trials,
        code_length: args.code_length,
        with_enter: args.enter,
        config,
        scanner,
        human_false_positives,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Scanner bursts ({} chars{}): {} exact | {} fragmented | {} missed",
        report.code_length,
        if report.with_enter { " + Enter" } else { "" },
        report.scanner.exact,
        report.scanner.fragmented,
        report.scanner.missed
    );
    println!(
        "Human typing: {} false positives out of {}",
        report.human_false_positives, report.trials
    );

    Ok(())
}
