//! Token counting pipeline
//!
//! [`TokenCounter`] ties the pieces of a counting run together: every line
//! of every source is split into tokens, the tokens pass through the
//! [`TokenFilter`] into a [`FrequencyTable`], and the ranked table is written
//! as a report, optionally trimmed by a [`VocabularySelector`].
//!
//! Sources are counted into a private table first and merged only when they
//! were read completely, so an unreadable source contributes nothing.

use crate::error::{CoreError, Result};
use crate::frequency::{FrequencyTable, SortOrder, TokenCount, TokenFilter};
use crate::selector::{OutputFlags, VocabularySelector};
use crate::source::{tokenize, TextSource};
use log::{debug, info, warn};
use std::io::Write;

/// Totals for one or more counted sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountSummary {
    /// Sources read to the end and merged
    pub sources_read: usize,
    /// Sources skipped because of an I/O failure
    pub sources_skipped: usize,
    /// Tokens seen in merged sources
    pub tokens_seen: u64,
    /// Tokens that passed the filter in merged sources
    pub tokens_counted: u64,
}

impl CountSummary {
    /// Add another summary's totals to this one
    pub fn absorb(&mut self, other: CountSummary) {
        self.sources_read += other.sources_read;
        self.sources_skipped += other.sources_skipped;
        self.tokens_seen += other.tokens_seen;
        self.tokens_counted += other.tokens_counted;
    }
}

/// Orchestrates filtering, counting, ranking and report writing
#[derive(Debug, Default)]
pub struct TokenCounter {
    table: FrequencyTable,
    selector: Option<VocabularySelector>,
    flags: OutputFlags,
}

impl TokenCounter {
    /// Counter that counts every token and reports the full list
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter applying `filter` to every token
    pub fn with_filter(filter: TokenFilter) -> Self {
        Self {
            table: FrequencyTable::with_filter(filter),
            ..Self::default()
        }
    }

    /// Trim the report with `selector`
    pub fn with_selector(mut self, selector: VocabularySelector) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Replace the output selector; `None` reports every token
    pub fn set_selector(&mut self, selector: Option<VocabularySelector>) {
        self.selector = selector;
    }

    /// The configured output selector
    pub fn selector(&self) -> Option<&VocabularySelector> {
        self.selector.as_ref()
    }

    /// The table accumulated so far
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Flags from the latest filtered report
    pub fn flags(&self) -> &OutputFlags {
        &self.flags
    }

    /// Count every source in order
    ///
    /// A source failing with an I/O error is logged and skipped. Any other
    /// error (an invalid pattern) aborts the run.
    pub fn run<I>(&mut self, sources: I) -> Result<CountSummary>
    where
        I: IntoIterator<Item = TextSource>,
    {
        let mut summary = CountSummary::default();
        for source in sources {
            summary.absorb(self.observe_source(source)?);
        }
        info!(
            "Counted {} tokens from {} sources ({} skipped), {} distinct",
            summary.tokens_counted,
            summary.sources_read,
            summary.sources_skipped,
            self.table.len()
        );
        Ok(summary)
    }

    /// Count a single source, skipping it on I/O failure
    pub fn observe_source(&mut self, source: TextSource) -> Result<CountSummary> {
        let name = source.name();
        debug!("Processing source {name}");
        let outcome = count_source(&self.table, source);
        self.merge_outcome(&name, outcome)
    }

    /// Count sources concurrently
    ///
    /// Each source is counted into its own table on the rayon pool; the
    /// merge into the shared table happens on the calling thread only.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(&mut self, sources: Vec<TextSource>) -> Result<CountSummary> {
        use rayon::prelude::*;

        let template = self.table.fresh();
        let outcomes: Vec<(String, Result<SourceCount>)> = sources
            .into_par_iter()
            .map(|source| (source.name(), count_source(&template, source)))
            .collect();

        let mut summary = CountSummary::default();
        for (name, outcome) in outcomes {
            summary.absorb(self.merge_outcome(&name, outcome)?);
        }
        info!(
            "Counted {} tokens from {} sources ({} skipped) in parallel, {} distinct",
            summary.tokens_counted,
            summary.sources_read,
            summary.sources_skipped,
            self.table.len()
        );
        Ok(summary)
    }

    fn merge_outcome(&mut self, name: &str, outcome: Result<SourceCount>) -> Result<CountSummary> {
        match outcome {
            Ok(counted) => {
                debug!(
                    "Source {name}: {} of {} tokens counted",
                    counted.tokens_counted, counted.tokens_seen
                );
                self.table.merge(counted.table);
                Ok(CountSummary {
                    sources_read: 1,
                    sources_skipped: 0,
                    tokens_seen: counted.tokens_seen,
                    tokens_counted: counted.tokens_counted,
                })
            }
            Err(e) if e.is_io() => {
                warn!("Skipping source {name}: {e}");
                Ok(CountSummary {
                    sources_skipped: 1,
                    ..CountSummary::default()
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Current table ranked by count
    pub fn rank(&self, order: SortOrder) -> Vec<TokenCount> {
        self.table.rank(order)
    }

    /// Current table, most frequent first
    pub fn report(&self) -> Vec<TokenCount> {
        self.rank(SortOrder::Descending)
    }

    /// Write `ranked` as `<token> <count>` lines
    ///
    /// With a selector configured, the output flags are first rebuilt from
    /// the descending ranking of the whole table and only flagged entries
    /// are written. Entries keep the order of `ranked` either way. Returns
    /// the number of lines written.
    pub fn write_report<W: Write>(&mut self, ranked: &[TokenCount], mut writer: W) -> Result<usize> {
        let write_err = |e: std::io::Error| CoreError::io("failed to write report", e);

        let mut written = 0;
        match self.selector {
            None => {
                for entry in ranked {
                    writeln!(writer, "{entry}").map_err(write_err)?;
                    written += 1;
                }
            }
            Some(selector) => {
                let descending = self.table.rank(SortOrder::Descending);
                self.flags.rebuild(&selector, &descending);
                debug!(
                    "Selector {selector} kept {} of {} tokens",
                    self.flags.selected_count(),
                    descending.len()
                );
                for entry in ranked {
                    if self.flags.should_output(&entry.token) {
                        writeln!(writer, "{entry}").map_err(write_err)?;
                        written += 1;
                    }
                }
            }
        }
        writer.flush().map_err(write_err)?;

        Ok(written)
    }
}

struct SourceCount {
    table: FrequencyTable,
    tokens_seen: u64,
    tokens_counted: u64,
}

fn count_source(template: &FrequencyTable, source: TextSource) -> Result<SourceCount> {
    let mut counted = SourceCount {
        table: template.fresh(),
        tokens_seen: 0,
        tokens_counted: 0,
    };
    source.for_each_line(|line| {
        for token in tokenize(line) {
            counted.tokens_seen += 1;
            if counted.table.observe(token)? {
                counted.tokens_counted += 1;
            }
        }
        Ok(())
    })?;
    Ok(counted)
}
