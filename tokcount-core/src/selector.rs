//! Vocabulary selection strategies
//!
//! A [`VocabularySelector`] decides which tokens of a ranked list make it
//! into the written report. The decision is materialised as [`OutputFlags`],
//! which are cleared and rebuilt on every selection run.

use crate::error::{CoreError, Result};
use crate::frequency::TokenCount;
use std::collections::HashMap;
use std::fmt;

/// Strategy for choosing the output vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularySelector {
    /// Keep the first `size` tokens of the descending ranking
    FixedSize {
        /// Number of tokens to keep
        size: usize,
    },
    /// Keep every token seen more than `min_exclusive` times
    Threshold {
        /// Counts must be strictly greater than this
        min_exclusive: u64,
    },
}

impl VocabularySelector {
    /// Configuration name of the fixed-size selector
    pub const FIXED_SIZE: &'static str = "fixedsize";
    /// Configuration name of the threshold selector
    pub const THRESHOLD: &'static str = "largerthan";

    /// Build a selector from its configuration name and parameter
    pub fn from_name_value(name: &str, value: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidSelectorValue {
            name: name.to_string(),
            value: value.to_string(),
        };

        match name {
            Self::FIXED_SIZE => {
                let size = value.trim().parse().map_err(|_| invalid())?;
                Ok(VocabularySelector::FixedSize { size })
            }
            Self::THRESHOLD => {
                // Counts are at least 1, so any negative threshold keeps every token.
                let threshold: i64 = value.trim().parse().map_err(|_| invalid())?;
                Ok(VocabularySelector::Threshold {
                    min_exclusive: threshold.max(0).unsigned_abs(),
                })
            }
            _ => Err(CoreError::UnknownSelector(name.to_string())),
        }
    }

    /// Configuration name of this selector
    pub fn name(&self) -> &'static str {
        match self {
            VocabularySelector::FixedSize { .. } => Self::FIXED_SIZE,
            VocabularySelector::Threshold { .. } => Self::THRESHOLD,
        }
    }

    /// Decide, for each entry of a descending ranking, whether it is kept
    ///
    /// The returned flags are parallel to `ranked`.
    pub fn select(&self, ranked: &[TokenCount]) -> Vec<bool> {
        match *self {
            VocabularySelector::FixedSize { size } => {
                (0..ranked.len()).map(|position| position < size).collect()
            }
            VocabularySelector::Threshold { min_exclusive } => ranked
                .iter()
                .map(|entry| entry.count > min_exclusive)
                .collect(),
        }
    }
}

impl fmt::Display for VocabularySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabularySelector::FixedSize { size } => write!(f, "{} {}", self.name(), size),
            VocabularySelector::Threshold { min_exclusive } => {
                write!(f, "{} {}", self.name(), min_exclusive)
            }
        }
    }
}

/// Per-token output decisions from the latest selection run
#[derive(Debug, Clone, Default)]
pub struct OutputFlags {
    flags: HashMap<String, bool>,
}

impl OutputFlags {
    /// Empty flag set; every token is rejected until the first rebuild
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every known flag to `false`
    pub fn clear(&mut self) {
        for flag in self.flags.values_mut() {
            *flag = false;
        }
    }

    /// Recompute all flags from a descending ranking
    pub fn rebuild(&mut self, selector: &VocabularySelector, ranked: &[TokenCount]) {
        self.clear();
        let decisions = selector.select(ranked);
        for (entry, keep) in ranked.iter().zip(decisions) {
            self.flags.insert(entry.token.clone(), keep);
        }
    }

    /// Whether the latest run kept `token`
    pub fn should_output(&self, token: &str) -> bool {
        self.flags.get(token).copied().unwrap_or(false)
    }

    /// Number of tokens currently flagged for output
    pub fn selected_count(&self) -> usize {
        self.flags.values().filter(|&&keep| keep).count()
    }
}
