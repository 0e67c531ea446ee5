//! Token stream to identifier stream conversion
//!
//! [`SequenceConverter`] rewrites text as vocabulary identifiers. Tokens
//! outside the vocabulary are dropped. Tokens matching the separator pattern
//! mark segment boundaries, written as `|` between two known identifiers;
//! a segment without any known token produces no delimiter.
//!
//! The conversion is a single pass over each line with a token cursor and
//! two identifiers carried across lines: the previous and the current one.
//! On a separator the converter scans ahead for the next known token and
//! decides the emission from where the separator sits on the line and
//! whether an earlier identifier exists.

use crate::error::{CoreError, Result};
use crate::pattern::TokenPattern;
use crate::source::{tokenize, TextSource};
use crate::vocabulary::VocabularyIndex;
use log::debug;
use std::fmt;
use std::io::Write;

/// One unit of converted output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceUnit {
    /// A known token, written as `<id>(<token>)`
    Id {
        /// Vocabulary identifier
        id: usize,
        /// Surface form of the token
        token: String,
    },
    /// A segment boundary, written as `|`
    Delimiter,
}

impl fmt::Display for SequenceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceUnit::Id { id, token } => write!(f, "{id}({token})"),
            SequenceUnit::Delimiter => f.write_str("|"),
        }
    }
}

/// Identifiers carried from one token to the next
///
/// `None` stands for "no identifier yet". A fresh state is used for every
/// source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConverterState {
    /// Identifier before the current one
    pub previous: Option<usize>,
    /// Most recent identifier
    pub current: Option<usize>,
}

impl ConverterState {
    fn advance(&mut self, next: Option<usize>) {
        self.previous = self.current;
        self.current = next;
    }
}

/// Totals for one converted source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Lines read
    pub lines: usize,
    /// Tokens read
    pub tokens: usize,
    /// Identifier units written
    pub identifiers: usize,
    /// Delimiter units written
    pub delimiters: usize,
}

/// Converts token streams into identifier streams
#[derive(Debug, Clone)]
pub struct SequenceConverter<'v> {
    vocabulary: &'v VocabularyIndex,
    separator: TokenPattern,
}

impl<'v> SequenceConverter<'v> {
    /// Converter looking tokens up in `vocabulary` and detecting segment
    /// boundaries with `separator`
    pub fn new(vocabulary: &'v VocabularyIndex, separator: TokenPattern) -> Self {
        Self {
            vocabulary,
            separator,
        }
    }

    /// The vocabulary used for lookups
    pub fn vocabulary(&self) -> &VocabularyIndex {
        self.vocabulary
    }

    /// The separator pattern
    pub fn separator(&self) -> &TokenPattern {
        &self.separator
    }

    /// Convert one line, appending output units to `units`
    pub fn convert_line(
        &self,
        line: &str,
        state: &mut ConverterState,
        units: &mut Vec<SequenceUnit>,
    ) -> Result<()> {
        let tokens: Vec<&str> = tokenize(line).collect();
        let mut cursor = 0;

        while cursor < tokens.len() {
            let token = tokens[cursor];

            if !self.separator.matches(token)? {
                if let Some(id) = self.vocabulary.lookup(token) {
                    state.advance(Some(id));
                    units.push(SequenceUnit::Id {
                        id,
                        token: token.to_string(),
                    });
                }
                cursor += 1;
                continue;
            }

            let separator_at = cursor;
            let (stop, next) = self.scan_for_known(&tokens, separator_at + 1);

            match next {
                Some((id, next_token)) if separator_at > 0 => {
                    if state.previous.is_some() {
                        units.push(SequenceUnit::Delimiter);
                    }
                    units.push(SequenceUnit::Id {
                        id,
                        token: next_token.to_string(),
                    });
                }
                None if state.previous.is_some() => units.push(SequenceUnit::Delimiter),
                // A separator opening the line swallows the token it finds.
                _ => {}
            }

            state.advance(next.map(|(id, _)| id));
            // The found token, if any, is consumed with the separator.
            cursor = stop + 1;
        }

        Ok(())
    }

    /// Find the first vocabulary token at or after `from`
    ///
    /// Returns the position where the scan stopped (`tokens.len()` when it
    /// ran off the line) and the identifier and token found there.
    fn scan_for_known<'t>(
        &self,
        tokens: &[&'t str],
        from: usize,
    ) -> (usize, Option<(usize, &'t str)>) {
        for (position, &candidate) in tokens.iter().enumerate().skip(from) {
            if let Some(id) = self.vocabulary.lookup(candidate) {
                return (position, Some((id, candidate)));
            }
        }
        (tokens.len(), None)
    }

    /// Convert a whole source, writing `<unit> ` for every output unit
    pub fn convert_source<W: Write>(
        &self,
        source: TextSource,
        mut writer: W,
    ) -> Result<ConversionStats> {
        let name = source.name();
        let write_err = |e: std::io::Error| CoreError::io(format!("failed to write ids for {name}"), e);

        let mut state = ConverterState::default();
        let mut stats = ConversionStats::default();
        let mut units = Vec::new();

        source.for_each_line(|line| {
            stats.lines += 1;
            stats.tokens += tokenize(line).count();

            units.clear();
            self.convert_line(line, &mut state, &mut units)?;
            for unit in &units {
                match unit {
                    SequenceUnit::Id { .. } => stats.identifiers += 1,
                    SequenceUnit::Delimiter => stats.delimiters += 1,
                }
                write!(writer, "{unit} ").map_err(write_err)?;
            }
            Ok(())
        })?;
        writer.flush().map_err(write_err)?;

        debug!(
            "Converted {name}: {} tokens, {} ids, {} delimiters",
            stats.tokens, stats.identifiers, stats.delimiters
        );
        Ok(stats)
    }

    /// Convert in-memory text to its output string
    pub fn convert_text(&self, text: &str) -> Result<String> {
        let mut out = Vec::new();
        self.convert_source(TextSource::from_text(text), &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
