use std::collections::HashMap;

use aho_corasick::AhoCorasick;
use log::debug;
use smallvec::SmallVec;

use super::IndexGroup;
use crate::error::{BuildErrorKind, MatcherError, Result};
use crate::types::RuleIndex;

/// Substring (keyword) index
///
/// Texts registered before the last [`SubstringIndex::build`] are searched with
/// an Aho-Corasick automaton; texts registered after it are scanned linearly,
/// so the index answers queries whether or not it was ever built.
#[derive(Debug, Default)]
pub struct SubstringIndex {
    /// Distinct texts; position is the automaton pattern id
    texts: Vec<Box<str>>,
    rules: Vec<SmallVec<[RuleIndex; 1]>>,
    positions: HashMap<Box<str>, usize>,
    automaton: Option<AhoCorasick>,
    /// Number of leading `texts` covered by `automaton`
    compiled: usize,
    pattern_count: usize,
}

impl SubstringIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str, index: RuleIndex) -> Result<()> {
        if text.is_empty() {
            return Err(MatcherError::InvalidPattern(
                "empty keyword pattern".to_string(),
            ));
        }

        let pos = match self.positions.get(text) {
            Some(&pos) => pos,
            None => {
                let pos = self.texts.len();
                self.texts.push(Box::from(text));
                self.rules.push(SmallVec::new());
                self.positions.insert(Box::from(text), pos);
                pos
            }
        };
        self.rules[pos].push(index);
        self.pattern_count += 1;
        Ok(())
    }

    /// Compile every registered text into the automaton.
    pub fn build(&mut self) -> Result<()> {
        if self.compiled == self.texts.len() {
            return Ok(());
        }

        let automaton = AhoCorasick::new(self.texts.iter().map(|t| t.as_bytes())).map_err(|e| {
            MatcherError::build(
                BuildErrorKind::Automaton,
                format!("failed to build keyword automaton: {}", e),
            )
        })?;
        debug!(
            "keyword automaton built: {} texts, {} bytes",
            self.texts.len(),
            automaton.memory_usage()
        );
        self.automaton = Some(automaton);
        self.compiled = self.texts.len();
        Ok(())
    }

    /// Positions of texts registered since the last build
    fn uncompiled(&self) -> impl Iterator<Item = usize> + '_ {
        self.compiled..self.texts.len()
    }
}

impl IndexGroup for SubstringIndex {
    fn match_into(&self, candidate: &str, out: &mut Vec<RuleIndex>) {
        let mut hit: SmallVec<[usize; 8]> = SmallVec::new();
        if let Some(automaton) = &self.automaton {
            hit.extend(
                automaton
                    .find_overlapping_iter(candidate)
                    .map(|m| m.pattern().as_usize()),
            );
        }
        hit.extend(
            self.uncompiled()
                .filter(|&i| candidate.contains(&*self.texts[i])),
        );
        if hit.is_empty() {
            return;
        }

        // A text occurring several times is still one hit.
        hit.sort_unstable();
        hit.dedup();
        for i in hit {
            out.extend_from_slice(&self.rules[i]);
        }
    }

    fn match_any(&self, candidate: &str) -> bool {
        if self
            .automaton
            .as_ref()
            .is_some_and(|automaton| automaton.is_match(candidate))
        {
            return true;
        }
        self.uncompiled()
            .any(|i| candidate.contains(&*self.texts[i]))
    }

    fn len(&self) -> usize {
        self.pattern_count
    }
}
