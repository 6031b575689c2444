//! Logging bridge for fonts-config.
//!
//! Routes the `log` facade to stderr as `[timestamp] [LEVEL] [target] message`
//! lines. The level follows the run's [`Verbosity`]; a `RUST_LOG` level name
//! (`off`, `error`, `warn`, `info`, `debug`, `trace`) overrides it.
//!
//! Generated configuration goes to files and `--info` goes to stdout, so
//! diagnostics never mix with either.

use std::fmt;
use std::io::Write;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use fonts_config_sysconfig::Verbosity;
use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl DebugLevel {
    /// Parse a level name or its number.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" | "0" => Some(DebugLevel::Off),
            "error" | "1" => Some(DebugLevel::Error),
            "warn" | "2" => Some(DebugLevel::Warn),
            "info" | "3" => Some(DebugLevel::Info),
            "debug" | "4" => Some(DebugLevel::Debug),
            "trace" | "5" => Some(DebugLevel::Trace),
            _ => None,
        }
    }

    fn from_env() -> Option<Self> {
        std::env::var("RUST_LOG").ok().and_then(|v| Self::parse(&v))
    }

    pub fn from_verbosity(verbosity: Verbosity) -> Self {
        match verbosity.to_level_filter() {
            LevelFilter::Off => DebugLevel::Off,
            LevelFilter::Error => DebugLevel::Error,
            LevelFilter::Warn => DebugLevel::Warn,
            LevelFilter::Info => DebugLevel::Info,
            LevelFilter::Debug => DebugLevel::Debug,
            LevelFilter::Trace => DebugLevel::Trace,
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            DebugLevel::Off => LevelFilter::Off,
            DebugLevel::Error => LevelFilter::Error,
            DebugLevel::Warn => LevelFilter::Warn,
            DebugLevel::Info => LevelFilter::Info,
            DebugLevel::Debug => LevelFilter::Debug,
            DebugLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Global debug logger
struct DebugLogger {
    level: Mutex<DebugLevel>,
    /// Set when `RUST_LOG` picked the level; verbosity changes are then ignored.
    pinned: bool,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level.lock().to_level_filter()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(&get_timestamp(), record.level(), record.target(), record.args());
        let mut sink = self.sink.lock();
        let _ = sink.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}

static LOGGER: OnceLock<DebugLogger> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// One log line, newline terminated.
pub fn format_line(timestamp: &str, level: Level, target: &str, args: &fmt::Arguments) -> String {
    let level_str = match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN ",
        Level::Info => "INFO ",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("[{}] [{}] [{}] {}\n", timestamp, level_str, target, args)
}

/// Install the stderr logger. Later calls only return the active level.
pub fn init_log_bridge(verbosity: Verbosity) -> DebugLevel {
    let env_level = DebugLevel::from_env();
    let logger = LOGGER.get_or_init(|| DebugLogger {
        level: Mutex::new(env_level.unwrap_or_else(|| DebugLevel::from_verbosity(verbosity))),
        pinned: env_level.is_some(),
        sink: Mutex::new(Box::new(std::io::stderr())),
    });
    let level = *logger.level.lock();
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
    level
}

/// Follow a verbosity resolved after startup (from the sysconfig files).
pub fn set_verbosity(verbosity: Verbosity) {
    let Some(logger) = LOGGER.get() else {
        return;
    };
    if logger.pinned {
        return;
    }
    let level = DebugLevel::from_verbosity(verbosity);
    *logger.level.lock() = level;
    log::set_max_level(level.to_level_filter());
}
