//! Token frequency table and ranking

use crate::error::{CoreError, Result};
use crate::pattern::TokenPattern;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Sorting direction for a ranked list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Least frequent first
    Ascending,
    /// Most frequent first
    #[default]
    Descending,
}

impl SortOrder {
    /// Canonical short name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(CoreError::UnknownSortOrder(s.to_string())),
        }
    }
}

/// A token with its number of occurrences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCount {
    /// The token text
    pub token: String,
    /// Number of counted occurrences, always at least 1
    pub count: u64,
}

impl TokenCount {
    /// Create a new pair
    pub fn new(token: impl Into<String>, count: u64) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }
}

/// Report line form: `<token> <count>`
impl fmt::Display for TokenCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.token, self.count)
    }
}

/// Inclusion and exclusion patterns deciding which tokens are counted
#[derive(Debug, Clone)]
pub struct TokenFilter {
    /// Tokens must fully match this pattern to be counted
    pub count: TokenPattern,
    /// Tokens fully matching this pattern are never counted
    pub ignore: TokenPattern,
}

impl TokenFilter {
    /// Filter from explicit patterns
    pub fn new(count: TokenPattern, ignore: TokenPattern) -> Self {
        Self { count, ignore }
    }

    /// Whether a token qualifies for counting
    pub fn accepts(&self, token: &str) -> Result<bool> {
        Ok(self.count.matches(token)? && !self.ignore.matches(token)?)
    }
}

/// Counts every token
impl Default for TokenFilter {
    fn default() -> Self {
        Self::new(TokenPattern::any(), TokenPattern::nothing())
    }
}

/// Mapping from token to occurrence count
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    filter: Arc<TokenFilter>,
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    /// Table that counts every token
    pub fn new() -> Self {
        Self::with_filter(TokenFilter::default())
    }

    /// Table counting only tokens accepted by `filter`
    pub fn with_filter(filter: TokenFilter) -> Self {
        Self {
            filter: Arc::new(filter),
            counts: HashMap::new(),
        }
    }

    /// Empty table sharing this table's filter
    pub fn fresh(&self) -> Self {
        Self {
            filter: Arc::clone(&self.filter),
            counts: HashMap::new(),
        }
    }

    /// The filter applied by [`observe`](Self::observe)
    pub fn filter(&self) -> &TokenFilter {
        &self.filter
    }

    /// Count one occurrence of `token` if the filter accepts it
    ///
    /// Returns whether the token was counted.
    pub fn observe(&mut self, token: &str) -> Result<bool> {
        if !self.filter.accepts(token)? {
            return Ok(false);
        }
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(token.to_string(), 1);
            }
        }
        Ok(true)
    }

    /// Fold another table's counts into this one
    pub fn merge(&mut self, other: FrequencyTable) {
        for (token, count) in other.counts {
            *self.counts.entry(token).or_insert(0) += count;
        }
    }

    /// All pairs sorted by count
    ///
    /// Equal counts are ordered by token text so repeated calls on the same
    /// table produce the same list.
    pub fn rank(&self, order: SortOrder) -> Vec<TokenCount> {
        let mut ranked: Vec<TokenCount> = self
            .counts
            .iter()
            .map(|(token, &count)| TokenCount::new(token.as_str(), count))
            .collect();

        match order {
            SortOrder::Ascending => {
                ranked.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.token.cmp(&b.token)))
            }
            SortOrder::Descending => {
                ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)))
            }
        }

        ranked
    }

    /// Count for a token, if it has been counted
    pub fn get(&self, token: &str) -> Option<u64> {
        self.counts.get(token).copied()
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no token has been counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
