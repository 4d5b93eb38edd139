use std::collections::HashMap;

use log::debug;

use super::mph::{roll, Displacement, KeyRules, MphTable, MAX_SEED_ATTEMPTS};
use crate::error::{MatcherError, Result};
use crate::matcher::IndexGroup;
use crate::types::{PatternKind, RuleIndex};

/// Exact and domain-suffix index
///
/// Keys are deduplicated by text; a full pattern and a domain pattern on the
/// same text share one key and are both reported on a hit. Nothing added is
/// searchable until [`ExactIndex::build`] has run, and the index refuses new
/// patterns afterwards.
#[derive(Debug, Default)]
pub struct ExactIndex {
    /// Distinct keys in first-insertion order
    pending_keys: Vec<Box<str>>,
    pending_rules: Vec<KeyRules>,
    positions: HashMap<Box<str>, usize>,
    /// Frozen table; `None` after building an empty index
    table: Option<MphTable>,
    built: bool,
    pattern_count: usize,
    /// Seeds tried per perfect-hash bucket; `None` means the default budget
    seed_budget: Option<u32>,
}

impl ExactIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// An index whose build gives up after `budget` seeds per bucket.
    #[cfg(test)]
    pub(crate) fn with_seed_budget(budget: u32) -> Self {
        Self {
            seed_budget: Some(budget),
            ..Self::default()
        }
    }

    /// Register a full or domain pattern under `index`.
    pub fn add(&mut self, kind: PatternKind, text: &str, index: RuleIndex) -> Result<()> {
        if self.built {
            return Err(MatcherError::AlreadyBuilt);
        }
        if !kind.is_exact() {
            return Err(MatcherError::InvalidPattern(format!(
                "{} patterns are not served by the exact index",
                kind.prefix()
            )));
        }
        if text.is_empty() {
            return Err(MatcherError::InvalidPattern(format!(
                "empty {} pattern",
                kind.prefix()
            )));
        }

        let pos = match self.positions.get(text) {
            Some(&pos) => pos,
            None => {
                let pos = self.pending_keys.len();
                self.pending_keys.push(Box::from(text));
                self.pending_rules.push(KeyRules::default());
                self.positions.insert(Box::from(text), pos);
                pos
            }
        };

        let rules = &mut self.pending_rules[pos];
        if kind == PatternKind::Full {
            rules.full.push(index);
        } else {
            rules.domain.push(index);
        }
        self.pattern_count += 1;
        Ok(())
    }

    /// Freeze pending patterns into the perfect hash table.
    ///
    /// Calling this again after success is a no-op. On failure the pending
    /// patterns are kept and the index stays unbuilt.
    pub fn build(&mut self) -> Result<()> {
        if self.built {
            return Ok(());
        }
        if self.pending_keys.is_empty() {
            self.built = true;
            return Ok(());
        }

        let budget = self.seed_budget.unwrap_or(MAX_SEED_ATTEMPTS);
        let displacement = Displacement::search_with(&self.pending_keys, budget)?;
        let buckets = displacement.buckets();
        let keys = std::mem::take(&mut self.pending_keys);
        let rules = std::mem::take(&mut self.pending_rules);
        self.positions = HashMap::new();

        let table = MphTable::new(displacement, keys, rules);
        debug!(
            "exact index built: {} patterns, {} keys, {} buckets, {} slots",
            self.pattern_count,
            table.key_count(),
            buckets,
            table.slot_count()
        );
        self.table = Some(table);
        self.built = true;
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        self.built
    }
}

impl IndexGroup for ExactIndex {
    fn match_into(&self, candidate: &str, out: &mut Vec<RuleIndex>) {
        let Some(table) = &self.table else {
            return;
        };

        // Walk right to left; at each dot the hash covers exactly the suffix after it.
        let bytes = candidate.as_bytes();
        let mut hash = 0u32;
        for i in (0..bytes.len()).rev() {
            if bytes[i] == b'.' {
                if let Some(rules) = table.lookup(hash, &candidate[i + 1..]) {
                    out.extend_from_slice(&rules.domain);
                }
            }
            hash = roll(hash, bytes[i]);
        }

        if let Some(rules) = table.lookup(hash, candidate) {
            out.extend_from_slice(&rules.full);
            out.extend_from_slice(&rules.domain);
        }
    }

    fn match_any(&self, candidate: &str) -> bool {
        let Some(table) = &self.table else {
            return false;
        };

        let bytes = candidate.as_bytes();
        let mut hash = 0u32;
        for i in (0..bytes.len()).rev() {
            if bytes[i] == b'.' {
                let hit = table.lookup(hash, &candidate[i + 1..]);
                if hit.is_some_and(|rules| !rules.domain.is_empty()) {
                    return true;
                }
            }
            hash = roll(hash, bytes[i]);
        }

        table
            .lookup(hash, candidate)
            .is_some_and(|rules| !rules.is_empty())
    }

    fn len(&self) -> usize {
        self.pattern_count
    }
}
