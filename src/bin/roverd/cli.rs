//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments of
//! the rover daemon.

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for roverd.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the daemon configuration file.
    #[arg(short, long, default_value = "roverd.toml")]
    pub config: std::path::PathBuf,

    /// Specify the log level of the daemon.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of the daemon.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// Only critical errors will be logged.
    #[value(alias("0"))]
    Error,

    /// Also log warnings.
    #[value(alias("1"))]
    Warn,

    /// The default log level. Logs the lifecycle of every command a rover
    /// picks up.
    #[default]
    #[value(alias("2"))]
    Info,

    /// Log everything which happens internally, including every poll of the
    /// command files. This output can be quite clunky.
    #[value(alias("3"))]
    Debug,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}
