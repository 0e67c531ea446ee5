//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// A required option was given neither on the command line nor in the config file
    MissingOption {
        /// Config file key
        key: &'static str,
        /// Command-line flag
        flag: &'static str,
    },
    /// An output filter name was given without a value
    MissingFilterValue(String),
    /// Input resolved to no files
    NoInputFiles(String),
    /// Configuration file could not be parsed
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingOption { key, flag } => write!(
                f,
                "Missing option '{key}': use {flag} or set '{key}' in the config file"
            ),
            CliError::MissingFilterValue(name) => write!(
                f,
                "Use --filter-value to specify the value for output filter {name}"
            ),
            CliError::NoInputFiles(input) => write!(f, "No input files found: {input}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
