use regex::Regex;

use super::IndexGroup;
use crate::error::{MatcherError, Result};
use crate::types::RuleIndex;

/// Ordered list of compiled regular expressions, tried one after another.
#[derive(Debug, Default)]
pub struct RegexIndex {
    entries: Vec<(Regex, RuleIndex)>,
}

impl RegexIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a pattern, attributing any failure to its source text.
    pub fn compile(pattern: &str) -> Result<Regex> {
        if pattern.is_empty() {
            return Err(MatcherError::InvalidPattern(
                "empty regexp pattern".to_string(),
            ));
        }
        Regex::new(pattern).map_err(|source| MatcherError::RegexCompile {
            pattern: pattern.to_string(),
            source,
        })
    }

    pub fn add(&mut self, pattern: &str, index: RuleIndex) -> Result<()> {
        let re = Self::compile(pattern)?;
        self.push(re, index);
        Ok(())
    }

    /// Append an already compiled expression.
    pub fn push(&mut self, re: Regex, index: RuleIndex) {
        self.entries.push((re, index));
    }
}

impl IndexGroup for RegexIndex {
    fn match_into(&self, candidate: &str, out: &mut Vec<RuleIndex>) {
        out.extend(
            self.entries
                .iter()
                .filter(|(re, _)| re.is_match(candidate))
                .map(|(_, index)| *index),
        );
    }

    fn match_any(&self, candidate: &str) -> bool {
        self.entries.iter().any(|(re, _)| re.is_match(candidate))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchored_regex() {
        let mut index = RegexIndex::new();
        index.add(r"^ads\.", 1).unwrap();

        assert!(index.match_any("ads.example.com"));
        assert!(!index.match_any("myads.example.com"));
    }

    #[test]
    fn test_results_in_registration_order() {
        let mut index = RegexIndex::new();
        index.add(r"\.com$", 7).unwrap();
        index.add(r"^www\.", 3).unwrap();
        index.add(r"^mail\.", 5).unwrap();

        let mut out = Vec::new();
        index.match_into("www.example.com", &mut out);
        assert_eq!(out, vec![7, 3]);
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let mut index = RegexIndex::new();
        let err = index.add("(unclosed", 1).unwrap_err();
        match err {
            MatcherError::RegexCompile { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("expected RegexCompile, got {:?}", other),
        }
        assert!(index.is_empty());
    }

    #[test]
    fn test_empty_regex_rejected() {
        assert!(matches!(
            RegexIndex::compile(""),
            Err(MatcherError::InvalidPattern(_))
        ));
    }
}
