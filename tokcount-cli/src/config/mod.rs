//! Configuration module
//!
//! Options can be stored in a TOML file and are overridden by command-line
//! flags. Keys keep the option names `input`, `output`, `countpattern`,
//! `ignorepattern` and `outputfilter.name` / `outputfilter.value`.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct CliConfig {
    /// Counting configuration
    #[serde(default)]
    pub count: CountConfig,

    /// Conversion configuration
    #[serde(default)]
    pub convert: ConvertConfig,
}

/// Counting-related configuration
#[derive(Debug, Deserialize, Default)]
pub struct CountConfig {
    /// Input file, directory or glob pattern
    pub input: Option<String>,

    /// Report file
    pub output: Option<PathBuf>,

    /// Inclusion pattern
    pub countpattern: Option<String>,

    /// Exclusion pattern
    pub ignorepattern: Option<String>,

    /// Report order (`desc` or `asc`)
    pub order: Option<String>,

    /// Output vocabulary filter
    pub outputfilter: Option<OutputFilterConfig>,
}

/// Output filter section
#[derive(Debug, Deserialize)]
pub struct OutputFilterConfig {
    /// Filter name (`fixedsize` or `largerthan`)
    pub name: String,

    /// Filter parameter
    pub value: Option<FilterValue>,
}

/// Filter parameter, written either as a TOML integer or a string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// `value = 100`
    Integer(i64),
    /// `value = "100"`
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Integer(value) => write!(f, "{value}"),
            FilterValue::Text(value) => f.write_str(value),
        }
    }
}

/// Conversion-related configuration
#[derive(Debug, Deserialize, Default)]
pub struct ConvertConfig {
    /// Input file or directory
    pub input: Option<PathBuf>,

    /// Output file or directory
    pub output: Option<PathBuf>,

    /// Vocabulary list (a frequency report)
    pub vocabulary: Option<PathBuf>,

    /// Separator pattern
    pub separatorpattern: Option<String>,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load the file if one was given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
