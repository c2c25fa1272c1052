//! Global logging setup (`log` facade, `fern` dispatcher)

use crate::config::LoggingConfig;
use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;
use std::path::PathBuf;
use std::{process, thread};

/// Where log lines go besides the optional file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Console {
    /// Raw-mode terminal front ends must not interleave logs with the UI
    Silent,
    Stderr,
}

/// Map a config level string onto a filter; unknown values mean INFO
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Configure global logging as requested in `logging`.
/// `default_file` is used when logging is enabled without an explicit file.
pub fn setup_logging(
    logging: &LoggingConfig,
    default_file: Option<&str>,
    console: Console,
) -> Result<(), fern::InitError> {
    let level = if logging.enable {
        parse_level(&logging.level)
    } else {
        LevelFilter::Off
    };

    let log_path = logging
        .enable
        .then(|| logging.file.as_deref().or(default_file))
        .flatten()
        .map(PathBuf::from);

    let mut dispatch = Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}][pid={}][tid={:?}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                process::id(),
                thread::current().id(),
                msg
            ))
        })
        .level(level);

    if console == Console::Stderr {
        dispatch = dispatch.chain(std::io::stderr());
    }

    if let Some(path) = log_path {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("Trace"), LevelFilter::Trace);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }
}
