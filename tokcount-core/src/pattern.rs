//! Full-match token patterns
//!
//! A [`TokenPattern`] answers whether a whole token satisfies a pattern. The
//! same type drives the count filter, the ignore filter and separator
//! detection in the converter.

use crate::error::{CoreError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Separators recognised when no separator pattern is configured
pub const DEFAULT_SEPARATOR_PATTERN: &str = r"\.|,|\n|:|\?|!";

#[derive(Debug, Clone)]
enum Matcher {
    Any,
    Nothing,
    Regex {
        source: String,
        // Compiled on first use; a compile error is kept and reported on every call.
        compiled: OnceLock<std::result::Result<Regex, regex::Error>>,
    },
}

/// A pattern that must match an entire token
#[derive(Debug, Clone)]
pub struct TokenPattern {
    matcher: Matcher,
}

impl TokenPattern {
    /// Pattern matching every token
    pub fn any() -> Self {
        Self {
            matcher: Matcher::Any,
        }
    }

    /// Pattern matching no token
    pub fn nothing() -> Self {
        Self {
            matcher: Matcher::Nothing,
        }
    }

    /// Pattern backed by a regular expression
    ///
    /// The expression is not compiled until the first call to
    /// [`matches`](Self::matches), so an invalid expression surfaces there.
    /// An empty expression can only match the empty token, which whitespace
    /// splitting never produces, so it is treated as [`nothing`](Self::nothing).
    pub fn regex(source: impl Into<String>) -> Self {
        let source = source.into();
        if source.is_empty() {
            return Self::nothing();
        }
        Self {
            matcher: Matcher::Regex {
                source,
                compiled: OnceLock::new(),
            },
        }
    }

    /// The conventional punctuation separator pattern
    pub fn default_separator() -> Self {
        Self::regex(DEFAULT_SEPARATOR_PATTERN)
    }

    /// Whether the entire token satisfies this pattern
    pub fn matches(&self, token: &str) -> Result<bool> {
        match &self.matcher {
            Matcher::Any => Ok(true),
            Matcher::Nothing => Ok(false),
            Matcher::Regex { source, compiled } => {
                match compiled.get_or_init(|| Regex::new(&format!("^(?:{source})$"))) {
                    Ok(regex) => Ok(regex.is_match(token)),
                    Err(e) => Err(CoreError::InvalidPattern {
                        pattern: source.clone(),
                        source: e.clone(),
                    }),
                }
            }
        }
    }

    /// Force compilation and report an invalid expression
    pub fn validate(&self) -> Result<()> {
        self.matches("").map(|_| ())
    }

    /// Pattern text as configured
    pub fn as_str(&self) -> &str {
        match &self.matcher {
            Matcher::Any => ".*",
            Matcher::Nothing => "",
            Matcher::Regex { source, .. } => source,
        }
    }
}

impl Default for TokenPattern {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for TokenPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
