//! Error types for counting and conversion

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the counting and conversion engines
#[derive(Error, Debug)]
pub enum CoreError {
    /// A filter or separator pattern failed to compile
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern text as configured
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Sort order name is not recognised
    #[error("unknown sorting order '{0}' (expected 'asc' or 'desc')")]
    UnknownSortOrder(String),

    /// Output selector name is not recognised
    #[error("unknown output token selector '{0}' (expected 'fixedsize' or 'largerthan')")]
    UnknownSelector(String),

    /// Output selector parameter could not be parsed
    #[error("invalid value '{value}' for output token selector '{name}'")]
    InvalidSelectorValue {
        /// Selector name
        name: String,
        /// The rejected value
        value: String,
    },

    /// The same token appears on two lines of a vocabulary source
    #[error("token '{token}' has multiple ids in {source_name} (lines {first_line} and {line})")]
    DuplicateToken {
        /// The repeated token
        token: String,
        /// Zero-based line of the first occurrence
        first_line: usize,
        /// Zero-based line of the repeated occurrence
        line: usize,
        /// Name of the vocabulary source
        source_name: String,
    },

    /// A single-file output path names an existing directory
    #[error("output {0} is an existing directory")]
    OutputIsDirectory(PathBuf),

    /// I/O failure while reading or writing a source
    #[error("{context}: {source}")]
    Io {
        /// What was being accessed
        context: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Wrap an I/O error with a description of what was being accessed
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        CoreError::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether this error is an I/O failure (as opposed to a configuration error)
    pub fn is_io(&self) -> bool {
        matches!(self, CoreError::Io { .. })
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
