//! Validate command implementation

use crate::config::{CliConfig, CountConfig, ConvertConfig};
use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tokcount_core::{SortOrder, TokenPattern, VocabularySelector};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let checked = CliConfig::from_file(&self.config).and_then(|config| {
            check_count(&config.count)?;
            check_convert(&config.convert)?;
            Ok(config)
        });

        match checked {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                if let Some(filter) = &config.count.outputfilter {
                    println!("  Output filter: {}", filter.name);
                }
                if let Some(vocabulary) = &config.convert.vocabulary {
                    println!("  Vocabulary: {}", vocabulary.display());
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {:#}", e))
            }
        }
    }
}

fn check_count(config: &CountConfig) -> Result<()> {
    for pattern in [&config.countpattern, &config.ignorepattern]
        .into_iter()
        .flatten()
    {
        TokenPattern::regex(pattern.as_str()).validate()?;
    }
    if let Some(order) = &config.order {
        order.parse::<SortOrder>()?;
    }
    if let Some(filter) = &config.outputfilter {
        let value = filter
            .value
            .as_ref()
            .ok_or_else(|| CliError::MissingFilterValue(filter.name.clone()))?;
        VocabularySelector::from_name_value(&filter.name, &value.to_string())?;
    }
    Ok(())
}

fn check_convert(config: &ConvertConfig) -> Result<()> {
    if let Some(pattern) = &config.separatorpattern {
        TokenPattern::regex(pattern.as_str()).validate()?;
    }
    Ok(())
}
