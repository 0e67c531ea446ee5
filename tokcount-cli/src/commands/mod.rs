//! CLI command implementations

use anyhow::{Context, Result};
use clap::Subcommand;

pub mod convert;
pub mod count;
pub mod generate_config;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Count token frequencies in a file or directory and write a report
    Count(count::CountArgs),

    /// Convert text into vocabulary ids using a frequency report
    Convert(convert::ConvertArgs),

    /// Write a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file and the patterns in it
    Validate(validate::ValidateArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Count(args) => args.execute(),
            Commands::Convert(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` takes precedence over the verbosity flags. Repeated calls are
/// ignored.
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}

/// Run `op` on a rayon pool with `threads` workers, or on the global pool
pub(crate) fn with_thread_pool<T, F>(threads: Option<usize>, op: F) -> Result<T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    match threads {
        Some(0) => anyhow::bail!("Thread count must be greater than 0"),
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("Failed to build thread pool")?;
            Ok(pool.install(op))
        }
        None => Ok(op()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_commands_debug_format() {
        let count_cmd = Commands::Count(count::CountArgs {
            input: Some("corpus".to_string()),
            output: Some(PathBuf::from("freq.txt")),
            count_pattern: None,
            ignore_pattern: None,
            filter_name: None,
            filter_value: None,
            order: None,
            config: None,
            parallel: false,
            threads: None,
            quiet: true,
            verbose: 0,
        });

        let debug_str = format!("{:?}", count_cmd);
        assert!(debug_str.contains("Count"));
        assert!(debug_str.contains("corpus"));

        let validate_cmd = Commands::Validate(validate::ValidateArgs {
            config: PathBuf::from("tokcount.toml"),
        });
        let debug_str = format!("{:?}", validate_cmd);
        assert!(debug_str.contains("Validate"));
        assert!(debug_str.contains("tokcount.toml"));
    }

    #[test]
    fn test_with_thread_pool() {
        assert_eq!(with_thread_pool(None, || 1 + 1).unwrap(), 2);
        assert_eq!(
            with_thread_pool(Some(2), rayon::current_num_threads).unwrap(),
            2
        );
        assert!(with_thread_pool(Some(0), || ()).is_err());
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(1, false);
        init_logging(2, false);
        init_logging(0, true);
    }
}
