//! Command-line arguments and the validated runtime configuration

use crate::document::{LoadOptions, MAX_FILE_BYTES};
use crate::logging::LogConfig;
use crate::view::Style;
use clap::{ArgAction, Parser};
use encoding_rs::Encoding;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Command-line arguments accepted by the `typeout` binary
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "typeout",
    version,
    about = "Reveal a text or source file character by character"
)]
pub struct Cli {
    /// File to load at start-up
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Milliseconds between automatic reveal steps
    #[arg(short, long = "interval-ms", env = "TYPEOUT_INTERVAL_MS", default_value_t = 30)]
    pub interval_ms: u64,

    /// Presentation style at start-up
    #[arg(short, long, value_enum, env = "TYPEOUT_STYLE", default_value_t = Style::Prose)]
    pub style: Style,

    /// Legacy encoding for files that are not UTF-8 (e.g. windows-1252, gbk, shift_jis).
    /// Guessed from the content when omitted.
    #[arg(short, long, value_name = "LABEL", env = "TYPEOUT_ENCODING")]
    pub encoding: Option<String>,

    /// Where to write the log
    #[arg(long, value_name = "PATH", env = "TYPEOUT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Invalid configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("the reveal interval must be at least 1 ms")]
    ZeroInterval,

    #[error("unknown encoding label '{0}'")]
    UnknownEncoding(String),
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub file: Option<PathBuf>,
    pub tick_interval: Duration,
    pub initial_style: Style,
    pub load: LoadOptions,
    pub log: LogConfig,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        if cli.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        let fallback = cli
            .encoding
            .as_deref()
            .map(|label| {
                Encoding::for_label(label.trim().as_bytes())
                    .ok_or_else(|| ConfigError::UnknownEncoding(label.to_string()))
            })
            .transpose()?;

        let mut log = LogConfig::from_verbosity(cli.verbose);
        if let Some(path) = cli.log_file {
            log = log.with_log_file(path);
        }

        Ok(Config {
            file: cli.file,
            tick_interval: Duration::from_millis(cli.interval_ms),
            initial_style: cli.style,
            load: LoadOptions {
                max_bytes: MAX_FILE_BYTES,
                fallback,
            },
            log,
        })
    }
}
