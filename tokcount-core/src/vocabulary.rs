//! Token to identifier index built from a ranked report

use crate::error::{CoreError, Result};
use crate::source::{tokenize, TextSource};
use log::debug;
use std::collections::HashMap;

/// Read-only mapping from token to a stable identifier
///
/// The identifier of a token is the zero-based number of the line that
/// starts with it in the vocabulary source. A blank line keeps its number
/// but defines no token.
#[derive(Debug, Clone, Default)]
pub struct VocabularyIndex {
    ids: HashMap<String, usize>,
    lines: usize,
}

impl VocabularyIndex {
    /// Build from lines shaped like a frequency report
    ///
    /// Fails with [`CoreError::DuplicateToken`] when a token starts two lines.
    pub fn from_lines<I, S>(lines: I, source_name: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for line in lines {
            index.push_line(line.as_ref(), source_name)?;
        }
        Ok(index)
    }

    /// Build from a text source
    pub fn from_source(source: TextSource) -> Result<Self> {
        let source_name = source.name();
        let mut index = Self::default();
        source.for_each_line(|line| index.push_line(line, &source_name))?;
        debug!(
            "Loaded {} tokens from {} lines of {source_name}",
            index.len(),
            index.lines
        );
        Ok(index)
    }

    fn push_line(&mut self, line: &str, source_name: &str) -> Result<()> {
        let id = self.lines;
        self.lines += 1;

        let Some(token) = tokenize(line).next() else {
            return Ok(());
        };
        if let Some(&first_line) = self.ids.get(token) {
            return Err(CoreError::DuplicateToken {
                token: token.to_string(),
                first_line,
                line: id,
                source_name: source_name.to_string(),
            });
        }
        self.ids.insert(token.to_string(), id);
        Ok(())
    }

    /// Identifier of `token`, if it is in the vocabulary
    pub fn lookup(&self, token: &str) -> Option<usize> {
        self.ids.get(token).copied()
    }

    /// Whether `token` is in the vocabulary
    pub fn contains(&self, token: &str) -> bool {
        self.ids.contains_key(token)
    }

    /// Number of tokens with an identifier
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the vocabulary defines no token
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
