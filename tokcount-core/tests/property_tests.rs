//! Property tests for counting, ranking, selection and conversion

use proptest::prelude::*;
use std::collections::HashSet;
use tokcount_core::*;

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-c]{1,2}",
        "[A-C]",
        "[0-9]{1,2}",
        Just(".".to_string()),
        Just(",".to_string()),
    ]
}

fn tokens_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(token_strategy(), 0..80)
}

proptest! {
    #[test]
    fn counts_sum_to_qualifying_tokens(tokens in tokens_strategy()) {
        let count = TokenPattern::regex("[a-z]+|[0-9]+");
        let ignore = TokenPattern::regex("[0-9]");
        let expected = tokens
            .iter()
            .filter(|t| count.matches(t).unwrap() && !ignore.matches(t).unwrap())
            .count() as u64;

        let mut table = FrequencyTable::with_filter(TokenFilter::new(count, ignore));
        for token in &tokens {
            table.observe(token).unwrap();
        }

        prop_assert_eq!(table.total(), expected);
        prop_assert!(table.rank(SortOrder::Descending).iter().all(|tc| tc.count >= 1));
    }

    #[test]
    fn rankings_are_reverses_modulo_ties(tokens in tokens_strategy()) {
        let mut table = FrequencyTable::new();
        for token in &tokens {
            table.observe(token).unwrap();
        }

        let asc = table.rank(SortOrder::Ascending);
        let desc = table.rank(SortOrder::Descending);

        prop_assert_eq!(asc.len(), table.len());
        prop_assert_eq!(desc.len(), table.len());

        let asc_counts: Vec<u64> = asc.iter().map(|tc| tc.count).collect();
        let mut desc_counts: Vec<u64> = desc.iter().map(|tc| tc.count).collect();
        desc_counts.reverse();
        prop_assert_eq!(asc_counts, desc_counts);

        let asc_tokens: HashSet<&str> = asc.iter().map(|tc| tc.token.as_str()).collect();
        let desc_tokens: HashSet<&str> = desc.iter().map(|tc| tc.token.as_str()).collect();
        prop_assert_eq!(asc_tokens.len(), asc.len());
        prop_assert_eq!(asc_tokens, desc_tokens);
    }

    #[test]
    fn flags_reflect_only_latest_selector(
        tokens in tokens_strategy(),
        size in 0usize..10,
        threshold in 0u64..5,
    ) {
        let mut table = FrequencyTable::new();
        for token in &tokens {
            table.observe(token).unwrap();
        }
        let ranked = table.rank(SortOrder::Descending);

        let mut flags = OutputFlags::new();
        flags.rebuild(&VocabularySelector::FixedSize { size }, &ranked);
        prop_assert_eq!(flags.selected_count(), size.min(ranked.len()));

        flags.rebuild(&VocabularySelector::Threshold { min_exclusive: threshold }, &ranked);
        for entry in &ranked {
            prop_assert_eq!(flags.should_output(&entry.token), entry.count > threshold);
        }
    }

    #[test]
    fn converter_emits_only_known_tokens(tokens in tokens_strategy()) {
        let vocabulary = VocabularyIndex::from_lines(["a 5", "b 4", "A 3", "7 1"], "v").unwrap();
        let converter = SequenceConverter::new(&vocabulary, TokenPattern::regex(r"\.|,"));
        let output = converter.convert_text(&tokens.join(" ")).unwrap();

        let mut previous_was_delimiter = false;
        for unit in output.split_whitespace() {
            if unit == "|" {
                prop_assert!(!previous_was_delimiter);
                previous_was_delimiter = true;
                continue;
            }
            previous_was_delimiter = false;
            let (id, rest) = unit.split_once('(').unwrap();
            let token = rest.strip_suffix(')').unwrap();
            prop_assert_eq!(vocabulary.lookup(token), Some(id.parse::<usize>().unwrap()));
        }
        prop_assert!(!output.starts_with('|'));
    }
}
