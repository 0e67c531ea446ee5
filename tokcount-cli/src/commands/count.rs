//! Count command implementation

use super::{init_logging, with_thread_pool};
use crate::config::{CliConfig, CountConfig};
use crate::error::CliError;
use crate::input::resolve_input;
use crate::output::prepare_file_target;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tokcount_core::{
    CountSummary, SortOrder, TextSource, TokenCounter, TokenFilter, TokenPattern,
    VocabularySelector,
};

/// Arguments for the count command
#[derive(Debug, Args)]
pub struct CountArgs {
    /// Input file, directory or glob pattern
    #[arg(short, long, value_name = "FILE/DIR")]
    pub input: Option<String>,

    /// Report file to write
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Count only tokens fully matching this regular expression
    #[arg(long, value_name = "REGEX")]
    pub count_pattern: Option<String>,

    /// Never count tokens fully matching this regular expression
    #[arg(long, value_name = "REGEX")]
    pub ignore_pattern: Option<String>,

    /// Output filter: fixedsize or largerthan
    #[arg(long, value_name = "NAME")]
    pub filter_name: Option<String>,

    /// Parameter of the output filter
    #[arg(long, value_name = "N")]
    pub filter_value: Option<String>,

    /// Report order: desc or asc
    #[arg(long, value_name = "ORDER")]
    pub order: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Count files concurrently
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker threads for --parallel (default: all cores)
    #[arg(short, long, value_name = "N", requires = "parallel")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Fully resolved counting options
#[derive(Debug)]
pub struct CountSettings {
    /// Input file, directory or glob pattern
    pub input: String,
    /// Report file
    pub output: PathBuf,
    /// Token filter
    pub filter: TokenFilter,
    /// Output vocabulary selector
    pub selector: Option<VocabularySelector>,
    /// Report order
    pub order: SortOrder,
}

impl CountArgs {
    /// Execute the count command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        log::info!("Starting token count");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        let settings = self.resolve(config.count)?;
        prepare_file_target(&settings.output)?;

        let files = resolve_input(&settings.input)?;
        log::info!("Counting {} file(s) from {}", files.len(), settings.input);

        let mut counter = TokenCounter::with_filter(settings.filter);
        counter.set_selector(settings.selector);

        let summary = if self.parallel {
            let sources = files.into_iter().map(TextSource::from_file).collect();
            with_thread_pool(self.threads, || counter.run_parallel(sources))??
        } else {
            let mut progress = ProgressReporter::new(self.quiet);
            progress.init_files(files.len() as u64);
            let mut summary = CountSummary::default();
            for path in files {
                let name = path.display().to_string();
                summary.absorb(counter.observe_source(TextSource::from_file(path))?);
                progress.file_completed(&name);
            }
            progress.finish();
            summary
        };

        if summary.sources_skipped > 0 {
            log::warn!("{} file(s) could not be read", summary.sources_skipped);
        }

        let ranked = counter.rank(settings.order);
        let file = File::create(&settings.output)
            .with_context(|| format!("Failed to create {}", settings.output.display()))?;
        let written = counter.write_report(&ranked, BufWriter::new(file))?;

        log::info!(
            "Wrote {} of {} tokens to {}",
            written,
            ranked.len(),
            settings.output.display()
        );
        Ok(())
    }

    /// Merge flags over config file values and validate the combination
    pub fn resolve(&self, config: CountConfig) -> Result<CountSettings> {
        let input = self
            .input
            .clone()
            .or(config.input)
            .ok_or(CliError::MissingOption {
                key: "input",
                flag: "--input",
            })?;
        let output = self
            .output
            .clone()
            .or(config.output)
            .ok_or(CliError::MissingOption {
                key: "output",
                flag: "--output",
            })?;

        let count = self
            .count_pattern
            .clone()
            .or(config.countpattern)
            .map(TokenPattern::regex)
            .unwrap_or_else(TokenPattern::any);
        let ignore = self
            .ignore_pattern
            .clone()
            .or(config.ignorepattern)
            .map(TokenPattern::regex)
            .unwrap_or_else(TokenPattern::nothing);

        let (config_filter_name, config_filter_value) = match config.outputfilter {
            Some(filter) => (Some(filter.name), filter.value.map(|v| v.to_string())),
            None => (None, None),
        };
        let selector = match self.filter_name.clone().or(config_filter_name) {
            Some(name) => {
                let value = self
                    .filter_value
                    .clone()
                    .or(config_filter_value)
                    .ok_or_else(|| CliError::MissingFilterValue(name.clone()))?;
                Some(VocabularySelector::from_name_value(&name, &value)?)
            }
            None => {
                if self.filter_value.is_some() {
                    log::warn!("--filter-value given without --filter-name; ignoring it");
                }
                None
            }
        };

        let order = match self.order.as_deref().or(config.order.as_deref()) {
            Some(order) => order.parse()?,
            None => SortOrder::Descending,
        };

        Ok(CountSettings {
            input,
            output,
            filter: TokenFilter::new(count, ignore),
            selector,
            order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilterValue, OutputFilterConfig};
    use std::fs;
    use tempfile::TempDir;
    use tokcount_core::CoreError;

    fn args() -> CountArgs {
        CountArgs {
            input: None,
            output: None,
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
        }
    }

    #[test]
    fn test_missing_input() {
        let err = args().resolve(CountConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--input"));
    }

    #[test]
    fn test_missing_output() {
        let mut args = args();
        args.input = Some("corpus".to_string());
        let err = args.resolve(CountConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--output"));
    }

    #[test]
    fn test_defaults() {
        let mut args = args();
        args.input = Some("corpus".to_string());
        args.output = Some(PathBuf::from("freq.txt"));

        let settings = args.resolve(CountConfig::default()).unwrap();
        assert!(settings.selector.is_none());
        assert_eq!(settings.order, SortOrder::Descending);
        assert!(settings.filter.accepts("Anything,at-all").unwrap());
    }

    #[test]
    fn test_flags_override_config() {
        let mut args = args();
        args.output = Some(PathBuf::from("cli.txt"));
        args.filter_value = Some("7".to_string());

        let config = CountConfig {
            input: Some("from-config".to_string()),
            output: Some(PathBuf::from("config.txt")),
            countpattern: Some("[a-z]+".to_string()),
            ignorepattern: None,
            order: Some("asc".to_string()),
            outputfilter: Some(OutputFilterConfig {
                name: "largerthan".to_string(),
                value: Some(FilterValue::Integer(2)),
            }),
        };

        let settings = args.resolve(config).unwrap();
        assert_eq!(settings.input, "from-config");
        assert_eq!(settings.output, PathBuf::from("cli.txt"));
        assert_eq!(settings.order, SortOrder::Ascending);
        assert_eq!(
            settings.selector,
            Some(VocabularySelector::Threshold { min_exclusive: 7 })
        );
        assert!(!settings.filter.accepts("ABC").unwrap());
    }

    #[test]
    fn test_filter_name_without_value() {
        let mut args = args();
        args.input = Some("corpus".to_string());
        args.output = Some(PathBuf::from("freq.txt"));
        args.filter_name = Some("fixedsize".to_string());

        let err = args.resolve(CountConfig::default()).unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_unknown_filter_and_order() {
        let mut args = args();
        args.input = Some("corpus".to_string());
        args.output = Some(PathBuf::from("freq.txt"));
        args.filter_name = Some("topk".to_string());
        args.filter_value = Some("3".to_string());
        let err = args.resolve(CountConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::UnknownSelector(_))
        ));

        args.filter_name = None;
        args.filter_value = None;
        args.order = Some("sideways".to_string());
        let err = args.resolve(CountConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::UnknownSortOrder(_))
        ));
    }

    #[test]
    fn test_execute_writes_filtered_report() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input.txt");
        let output = temp_dir.path().join("freq.txt");
        fs::write(&input, "a b b c c c\nd d d d").unwrap();

        let mut args = args();
        args.input = Some(input.display().to_string());
        args.output = Some(output.clone());
        args.filter_name = Some("fixedsize".to_string());
        args.filter_value = Some("2".to_string());
        args.execute().unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "d 4\nc 3\n");
    }

    #[test]
    fn test_execute_parallel_directory() {
        let temp_dir = TempDir::new().unwrap();
        let corpus = temp_dir.path().join("corpus");
        fs::create_dir(&corpus).unwrap();
        fs::write(corpus.join("one.txt"), "x y").unwrap();
        fs::write(corpus.join("two.txt"), "y z z").unwrap();
        let output = temp_dir.path().join("freq.txt");

        let mut args = args();
        args.input = Some(corpus.display().to_string());
        args.output = Some(output.clone());
        args.parallel = true;
        args.threads = Some(2);
        args.execute().unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "y 2\nz 2\nx 1\n");
    }
}
