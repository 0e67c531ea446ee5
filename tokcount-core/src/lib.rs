//! Token frequency counting and token-to-id sequence conversion
//!
//! This crate implements two related passes over whitespace-tokenized text:
//!
//! - **Counting**: tokens are filtered by an inclusion and an exclusion
//!   pattern, counted into a [`FrequencyTable`], ranked by frequency and
//!   optionally trimmed to a vocabulary by a [`VocabularySelector`].
//! - **Conversion**: a ranked report is loaded as a [`VocabularyIndex`]
//!   (identifier = line number) and a [`SequenceConverter`] rewrites new text
//!   as identifiers, marking segment boundaries found by a separator pattern.
//!
//! # Example
//!
//! ```rust
//! use tokcount_core::{SequenceConverter, TextSource, TokenCounter, TokenPattern, VocabularyIndex};
//!
//! let mut counter = TokenCounter::new();
//! counter.run([TextSource::from_text("the cat saw the dog")]).unwrap();
//!
//! let mut report = Vec::new();
//! let ranked = counter.report();
//! counter.write_report(&ranked, &mut report).unwrap();
//! let report = String::from_utf8(report).unwrap();
//! assert!(report.starts_with("the 2\n"));
//!
//! let vocabulary = VocabularyIndex::from_lines(report.lines(), "report").unwrap();
//! let converter = SequenceConverter::new(&vocabulary, TokenPattern::default_separator());
//! let ids = converter.convert_text("the dog . the cat").unwrap();
//! assert_eq!(ids, "0(the) 2(dog) | 0(the) 1(cat) ");
//! ```

#![warn(missing_docs)]

pub mod converter;
pub mod counter;
pub mod error;
pub mod frequency;
pub mod pattern;
pub mod selector;
pub mod source;
pub mod vocabulary;

pub use converter::{ConversionStats, ConverterState, SequenceConverter, SequenceUnit};
pub use counter::{CountSummary, TokenCounter};
pub use error::{CoreError, Result};
pub use frequency::{FrequencyTable, SortOrder, TokenCount, TokenFilter};
pub use pattern::TokenPattern;
pub use selector::{OutputFlags, VocabularySelector};
pub use source::TextSource;
pub use vocabulary::VocabularyIndex;
