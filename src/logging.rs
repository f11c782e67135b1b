//! Logging module for Circles Search
//!
//! Writes a session log next to the executable. Network failures,
//! persistence fallbacks, and analytics errors land here so they never
//! have to surface in the TUI.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Global logger instance
static LOGGER: OnceLock<Mutex<SessionLogger>> = OnceLock::new();

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Main logger struct
pub struct SessionLogger {
    file: Option<File>,
    min_level: LogLevel,
}

impl SessionLogger {
    /// Create a new logger
    fn new() -> Self {
        let log_path = Self::get_log_path();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true) // Start fresh each run
            .open(&log_path)
            .ok();

        Self {
            file,
            min_level: LogLevel::Info,
        }
    }

    /// Get the log file path (same directory as executable)
    fn get_log_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("circles.log")
    }

    /// Write a log entry
    fn log(&mut self, level: LogLevel, module: &str, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let entry = format!("[{}] [{:5}] [{}] {}\n", timestamp, level, module, message);

        if let Some(ref mut file) = self.file {
            let _ = file.write_all(entry.as_bytes());
            let _ = file.flush();
        }
    }
}

/// Initialize the global logger
pub fn init() {
    let _ = LOGGER.set(Mutex::new(SessionLogger::new()));
}

fn log(level: LogLevel, module: &str, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.lock().log(level, module, message);
    }
}

/// Log debug message
pub fn debug(module: &str, message: &str) {
    log(LogLevel::Debug, module, message);
}

/// Log info message
pub fn info(module: &str, message: &str) {
    log(LogLevel::Info, module, message);
}

/// Log warning message
pub fn warn(module: &str, message: &str) {
    log(LogLevel::Warn, module, message);
}

/// Log error message
pub fn error(module: &str, message: &str) {
    log(LogLevel::Error, module, message);
}

/// Log a dispatched search request
pub fn log_search_dispatch(generation: u64, query: &str) {
    info(
        "SEARCH",
        &format!("dispatch gen={} query='{}'", generation, query),
    );
}

/// Log a search response and how it was applied
pub fn log_search_response(generation: u64, query: &str, total: usize, applied: bool) {
    let disposition = if applied { "applied" } else { "stale, dropped" };
    info(
        "SEARCH",
        &format!(
            "response gen={} query='{}' results={} ({})",
            generation, query, total, disposition
        ),
    );
}

/// Log a cache hit tier for a lookup
pub fn log_cache_hit(query: &str, tier: &str) {
    debug("CACHE", &format!("{} hit for '{}'", tier, query));
}
