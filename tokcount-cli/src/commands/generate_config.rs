//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

const TEMPLATE: &str = r#"# tokcount configuration
#
# Command-line flags override the values in this file.

[count]
# File, directory (all files directly inside it) or glob pattern
input = "corpus/"

# Frequency report to write
output = "freq.txt"

# Count only tokens fully matching this regular expression (default: all)
# countpattern = "[a-z]+"

# Never count tokens fully matching this regular expression (default: none)
# ignorepattern = "the|a|an"

# Report order: "desc" (most frequent first) or "asc"
order = "desc"

# Output vocabulary filter (optional)
#   fixedsize  - the `value` most frequent tokens
#   largerthan - tokens seen more than `value` times
# [count.outputfilter]
# name = "fixedsize"
# value = 5000

[convert]
# File or directory to convert
input = "docs/"

# Output file, or directory when the input is a directory
output = "ids/"

# Vocabulary list: a report written by `tokcount count`
vocabulary = "freq.txt"

# Tokens fully matching this regular expression end a segment
separatorpattern = '\.|,|\n|:|\?|!'
"#;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the input, output and pattern settings");
        println!("2. Validate your configuration:");
        println!("   tokcount validate -c {}", self.output.display());
        println!("3. Use it for counting:");
        println!("   tokcount count -c {}", self.output.display());

        Ok(())
    }
}
