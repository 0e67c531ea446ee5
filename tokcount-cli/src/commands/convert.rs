//! Convert command implementation

use super::{init_logging, with_thread_pool};
use crate::config::{CliConfig, ConvertConfig};
use crate::error::CliError;
use crate::input::list_directory;
use crate::output::{
    prepare_directory_target, prepare_file_target, target_in_directory, write_output,
};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tokcount_core::{
    ConversionStats, SequenceConverter, TextSource, TokenPattern, VocabularyIndex,
};

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input file or directory
    #[arg(short, long, value_name = "FILE/DIR")]
    pub input: Option<PathBuf>,

    /// Output file, or output directory when the input is a directory
    #[arg(short, long, value_name = "FILE/DIR")]
    pub output: Option<PathBuf>,

    /// Vocabulary list, usually a report written by `count`
    #[arg(long, value_name = "FILE")]
    pub vocabulary: Option<PathBuf>,

    /// Tokens fully matching this regular expression end a segment
    #[arg(long, value_name = "REGEX")]
    pub separator_pattern: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Convert files concurrently
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

/// Fully resolved conversion options
#[derive(Debug)]
pub struct ConvertSettings {
    /// Input file or directory
    pub input: PathBuf,
    /// Output file or directory
    pub output: PathBuf,
    /// Vocabulary list
    pub vocabulary: PathBuf,
    /// Separator pattern
    pub separator: TokenPattern,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        log::info!("Starting conversion");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        let settings = self.resolve(config.convert)?;
        settings.separator.validate()?;

        let vocabulary = VocabularyIndex::from_source(TextSource::from_file(&settings.vocabulary))
            .with_context(|| {
                format!("Failed to load vocabulary: {}", settings.vocabulary.display())
            })?;
        log::info!(
            "Loaded {} vocabulary entries from {}",
            vocabulary.len(),
            settings.vocabulary.display()
        );
        let converter = SequenceConverter::new(&vocabulary, settings.separator.clone());

        let stats = if settings.input.is_dir() {
            self.convert_directory(&converter, &settings.input, &settings.output)?
        } else {
            prepare_file_target(&settings.output)?;
            let source = TextSource::from_file(&settings.input);
            vec![convert_file(&converter, source, &settings.output)?]
        };

        let identifiers: usize = stats.iter().map(|s| s.identifiers).sum();
        let delimiters: usize = stats.iter().map(|s| s.delimiters).sum();
        log::info!(
            "Converted {} file(s): {} ids, {} delimiters",
            stats.len(),
            identifiers,
            delimiters
        );
        Ok(())
    }

    fn convert_directory(
        &self,
        converter: &SequenceConverter<'_>,
        input: &Path,
        output: &Path,
    ) -> Result<Vec<ConversionStats>> {
        let files = list_directory(input)?;
        prepare_directory_target(output)?;
        log::info!("Converting {} file(s) into {}", files.len(), output.display());

        let mut jobs = Vec::with_capacity(files.len());
        for file in files {
            let target = target_in_directory(output, &file)?;
            jobs.push((TextSource::from_file(file), target));
        }
        self.convert_jobs(converter, jobs)
    }

    /// Convert every `(source, target)` pair, stopping at the first failure
    fn convert_jobs(
        &self,
        converter: &SequenceConverter<'_>,
        jobs: Vec<(TextSource, PathBuf)>,
    ) -> Result<Vec<ConversionStats>> {
        if self.parallel {
            with_thread_pool(self.threads, move || {
                jobs.into_par_iter()
                    .map(|(source, target)| convert_file(converter, source, &target))
                    .collect::<Result<Vec<_>>>()
            })?
        } else {
            let mut progress = ProgressReporter::new(self.quiet);
            progress.init_files(jobs.len() as u64);
            let mut stats = Vec::with_capacity(jobs.len());
            for (source, target) in jobs {
                let name = source.name();
                stats.push(convert_file(converter, source, &target)?);
                progress.file_completed(&name);
            }
            progress.finish();
            Ok(stats)
        }
    }

    /// Merge flags over config file values and validate the combination
    pub fn resolve(&self, config: ConvertConfig) -> Result<ConvertSettings> {
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
        let vocabulary = self
            .vocabulary
            .clone()
            .or(config.vocabulary)
            .ok_or(CliError::MissingOption {
                key: "vocabulary",
                flag: "--vocabulary",
            })?;
        let separator = self
            .separator_pattern
            .clone()
            .or(config.separatorpattern)
            .map(TokenPattern::regex)
            .unwrap_or_else(TokenPattern::default_separator);

        Ok(ConvertSettings {
            input,
            output,
            vocabulary,
            separator,
        })
    }
}

/// Convert one source fully in memory, then write it to `target`
///
/// Nothing is written when the source fails part way through.
fn convert_file(
    converter: &SequenceConverter<'_>,
    source: TextSource,
    target: &Path,
) -> Result<ConversionStats> {
    let name = source.name();
    let mut buffer = Vec::new();
    let stats = converter
        .convert_source(source, &mut buffer)
        .with_context(|| format!("Failed to convert {name}"))?;
    write_output(target, &buffer)?;
    log::debug!("Wrote {}", target.display());
    Ok(stats)
}
