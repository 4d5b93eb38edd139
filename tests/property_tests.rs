//! Property tests: MixedMatcher against a brute-force oracle

use proptest::prelude::*;
use regex::Regex;

use index_matcher_r::{MixedMatcher, Pattern, PatternKind, RuleIndex};

/// Valid regexes over the candidate alphabet
const REGEXES: &[&str] = &[r"^a", r"b$", r"a\.b", r"c+", r"^\.", r"ab|ba", r"^[abc]+$"];

fn pattern_strategy() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        "[abc.]{1,4}".prop_map(Pattern::full),
        "[abc.]{1,4}".prop_map(Pattern::domain),
        "[abc.]{1,3}".prop_map(Pattern::substring),
        prop::sample::select(REGEXES).prop_map(Pattern::regex),
    ]
}

/// Straightforward per-pattern evaluation
fn oracle(patterns: &[Pattern], candidate: &str) -> Vec<RuleIndex> {
    patterns
        .iter()
        .enumerate()
        .filter(|(_, p)| match p.kind {
            PatternKind::Full => candidate == p.text,
            PatternKind::Domain => {
                candidate == p.text || candidate.ends_with(&format!(".{}", p.text))
            }
            PatternKind::Substring => candidate.contains(p.text.as_str()),
            PatternKind::Regex => Regex::new(&p.text).unwrap().is_match(candidate),
        })
        .map(|(i, _)| i as RuleIndex + 1)
        .collect()
}

proptest! {
    #[test]
    fn prop_indices_are_sequential(patterns in prop::collection::vec(pattern_strategy(), 0..30)) {
        let mut matcher = MixedMatcher::new();
        for (n, pattern) in patterns.into_iter().enumerate() {
            prop_assert_eq!(matcher.add(pattern).unwrap(), n as RuleIndex + 1);
        }
    }

    #[test]
    fn prop_match_agrees_with_oracle(
        patterns in prop::collection::vec(pattern_strategy(), 0..30),
        candidates in prop::collection::vec("[abc.]{0,8}", 1..12),
    ) {
        let mut matcher = MixedMatcher::new();
        matcher.add_all(patterns.clone()).unwrap();
        matcher.build().unwrap();
        prop_assert_eq!(matcher.size() as usize, patterns.len());

        for candidate in &candidates {
            let mut got = matcher.match_rules(candidate);
            got.sort_unstable();
            let want = oracle(&patterns, candidate);
            prop_assert_eq!(&got, &want, "candidate {:?}", candidate);
            prop_assert_eq!(matcher.match_any(candidate), !got.is_empty());
        }
    }

    #[test]
    fn prop_build_is_idempotent(
        patterns in prop::collection::vec(pattern_strategy(), 0..20),
        candidate in "[abc.]{0,8}",
    ) {
        let mut matcher = MixedMatcher::new();
        matcher.add_all(patterns).unwrap();
        matcher.build().unwrap();
        let mut first = matcher.match_rules(&candidate);
        matcher.build().unwrap();
        let mut second = matcher.match_rules(&candidate);
        first.sort_unstable();
        second.sort_unstable();
        prop_assert_eq!(first, second);
    }
}
