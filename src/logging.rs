//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! The terminal UI owns stdout/stderr, so log output goes to a file.
//!
//! # Log Levels
//!
//! - `warn`: rejected requests, failed loads and exports
//! - `info`: documents loaded and exported
//! - `debug`: commands, transitions, timer start/stop, discarded load results
//! - `trace`: dropped and coalesced ticks
//!
//! `RUST_LOG` takes precedence over the level chosen with `-v`.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Configuration for logging behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    /// File the log lines are appended to
    pub log_file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: Level::WARN,
            log_file: default_log_file(),
        }
    }
}

impl LogConfig {
    /// Build from the `-v` count.
    ///
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        LogConfig {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.log_file = path;
        self
    }
}

/// `<temp dir>/typeout.log`
pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("typeout.log")
}

/// Install the global subscriber
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level).into())
        .from_env_lossy();

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level, Level::WARN);
        assert_eq!(LogConfig::from_verbosity(1).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(2).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(9).level, Level::TRACE);
    }

    #[test]
    fn test_log_file_override() {
        let config = LogConfig::default().with_log_file(PathBuf::from("/tmp/custom.log"));
        assert_eq!(config.log_file, PathBuf::from("/tmp/custom.log"));
        assert!(default_log_file().ends_with("typeout.log"));
    }
}
