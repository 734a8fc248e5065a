//! Logging configuration
//!
//! Consumed by the application's tracing setup. Lives in core so the
//! settings file can carry it alongside [`crate::config::Tuning`].

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::Level;

/// Logging configuration, part of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level: "trace", "debug", "info", "warn" or "error".
    pub level: String,
    /// Mirror logs to stderr.
    pub console_output: bool,
    /// Write logs to a session file.
    pub file_output: bool,
    /// Log directory. Defaults to the platform data dir.
    pub log_dir: Option<PathBuf>,
    /// Session log files kept by cleanup.
    pub max_log_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            file_output: false,
            log_dir: None,
            max_log_files: 10,
        }
    }
}

impl LogConfig {
    /// Parse the configured level, defaulting to INFO when invalid.
    pub fn parse_level(&self) -> Level {
        match self.level.to_ascii_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    /// Directory session logs are written to.
    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("marionette")
                .join("logs")
        })
    }

    /// Create the log directory if it does not exist.
    pub fn ensure_log_directory(&self) -> io::Result<()> {
        fs::create_dir_all(self.resolved_log_dir())
    }

    /// Path of this session's log file, timestamped.
    pub fn current_log_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        self.resolved_log_dir()
            .join(format!("marionette-{stamp}.log"))
    }

    /// Delete the oldest session logs beyond `max_log_files`.
    pub fn cleanup_old_logs(&self) -> io::Result<()> {
        let dir = self.resolved_log_dir();
        if !dir.exists() {
            return Ok(());
        }

        let mut logs: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with("marionette-") && n.ends_with(".log"))
                    .unwrap_or(false)
            })
            .collect();

        // Timestamped names sort chronologically
        logs.sort();
        while logs.len() > self.max_log_files {
            let oldest = logs.remove(0);
            fs::remove_file(oldest)?;
        }
        Ok(())
    }
}
