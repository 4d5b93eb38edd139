//! Mixed matcher module.
//!
//! Routes registered patterns to the sub-index that serves their kind and fans
//! queries out to every populated sub-index.

use log::{debug, trace, warn};

use crate::error::{BuildErrorKind, MatcherError, Result};
use crate::matcher::{ExactIndex, IndexGroup, RegexIndex, SubstringIndex};
use crate::parser::parse_pattern;
use crate::types::{Pattern, PatternKind, RuleIndex};

#[derive(Debug, Default)]
enum BuildState {
    #[default]
    Open,
    Built,
    /// A failed build is fatal: the instance only ever answers with no matches.
    Failed {
        kind: BuildErrorKind,
        message: String,
    },
}

/// Orchestrator over the exact, substring and regex indexes.
///
/// Lifecycle: patterns are added while the matcher is open, [`MixedMatcher::build`]
/// freezes it, then any number of threads may query it through `&self`.
/// Sub-indexes are created on first use of their kind; an absent sub-index
/// contributes nothing to a query.
#[derive(Debug, Default)]
pub struct MixedMatcher {
    count: RuleIndex,
    state: BuildState,
    exact: Option<ExactIndex>,
    substring: Option<SubstringIndex>,
    regexp: Option<RegexIndex>,
}

impl MixedMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern and return its rule index.
    ///
    /// Indices start at 1 and grow by one per successful call. A failed call
    /// leaves the matcher unchanged. After a failed build every call returns
    /// that build's error.
    pub fn add(&mut self, pattern: Pattern) -> Result<RuleIndex> {
        match &self.state {
            BuildState::Open => {}
            BuildState::Built => return Err(MatcherError::AlreadyBuilt),
            BuildState::Failed { kind, message } => {
                return Err(MatcherError::build(*kind, message.clone()));
            }
        }
        if pattern.text.is_empty() {
            return Err(MatcherError::InvalidPattern(format!(
                "empty {} pattern",
                pattern.kind.prefix()
            )));
        }
        let index = self
            .count
            .checked_add(1)
            .ok_or(MatcherError::IndexOverflow)?;

        match pattern.kind {
            PatternKind::Regex => {
                let re = RegexIndex::compile(&pattern.text)?;
                self.regexp
                    .get_or_insert_with(RegexIndex::default)
                    .push(re, index);
            }
            PatternKind::Substring => {
                self.substring
                    .get_or_insert_with(SubstringIndex::default)
                    .add(&pattern.text, index)?;
            }
            PatternKind::Full | PatternKind::Domain => {
                self.exact
                    .get_or_insert_with(ExactIndex::default)
                    .add(pattern.kind, &pattern.text, index)?;
            }
        }

        self.count = index;
        trace!("registered {} as rule {}", pattern, index);
        Ok(index)
    }

    pub fn add_full(&mut self, text: impl Into<String>) -> Result<RuleIndex> {
        self.add(Pattern::full(text))
    }

    pub fn add_domain(&mut self, text: impl Into<String>) -> Result<RuleIndex> {
        self.add(Pattern::domain(text))
    }

    pub fn add_substring(&mut self, text: impl Into<String>) -> Result<RuleIndex> {
        self.add(Pattern::substring(text))
    }

    pub fn add_regex(&mut self, text: impl Into<String>) -> Result<RuleIndex> {
        self.add(Pattern::regex(text))
    }

    /// Parse a rule expression such as `domain:example.com` and register it.
    pub fn add_expression(&mut self, expr: &str) -> Result<RuleIndex> {
        self.add(parse_pattern(expr)?)
    }

    /// Register patterns in order, stopping at the first error.
    ///
    /// Patterns before the failing one stay registered.
    pub fn add_all<I>(&mut self, patterns: I) -> Result<Vec<RuleIndex>>
    where
        I: IntoIterator<Item = Pattern>,
    {
        patterns.into_iter().map(|p| self.add(p)).collect()
    }

    /// Freeze the matcher for querying.
    ///
    /// Idempotent once it has succeeded. A build failure is fatal: it is
    /// reported again by every later call and the matcher matches nothing.
    pub fn build(&mut self) -> Result<()> {
        match &self.state {
            BuildState::Built => return Ok(()),
            BuildState::Failed { kind, message } => {
                return Err(MatcherError::build(*kind, message.clone()));
            }
            BuildState::Open => {}
        }

        match self.build_indexes() {
            Ok(()) => {
                self.state = BuildState::Built;
                debug!(
                    "matcher built: {} rules ({} exact, {} keyword, {} regexp)",
                    self.count,
                    self.exact.as_ref().map_or(0, |g| g.len()),
                    self.substring.as_ref().map_or(0, |g| g.len()),
                    self.regexp.as_ref().map_or(0, |g| g.len()),
                );
                Ok(())
            }
            Err(MatcherError::BuildFailure { kind, message }) => {
                warn!("matcher build failed: {}", message);
                self.state = BuildState::Failed {
                    kind,
                    message: message.clone(),
                };
                Err(MatcherError::BuildFailure { kind, message })
            }
            Err(err) => Err(err),
        }
    }

    fn build_indexes(&mut self) -> Result<()> {
        if let Some(exact) = &mut self.exact {
            exact.build()?;
        }
        if let Some(substring) = &mut self.substring {
            substring.build()?;
        }
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        matches!(self.state, BuildState::Built)
    }

    /// Populated sub-indexes in query order: exact, substring, regex.
    fn groups(&self) -> impl Iterator<Item = &dyn IndexGroup> {
        let exact = self.exact.as_ref().map(|g| g as &dyn IndexGroup);
        let substring = self.substring.as_ref().map(|g| g as &dyn IndexGroup);
        let regexp = self.regexp.as_ref().map(|g| g as &dyn IndexGroup);
        exact.into_iter().chain(substring).chain(regexp)
    }

    /// Rule indices of every pattern satisfied by `candidate`, in no
    /// particular order.
    ///
    /// `candidate` must already be normalized (lowercase, no trailing dot).
    pub fn match_rules(&self, candidate: &str) -> Vec<RuleIndex> {
        let mut out = Vec::new();
        self.match_into(candidate, &mut out);
        out
    }

    /// Like [`MixedMatcher::match_rules`], appending into a caller-owned buffer.
    pub fn match_into(&self, candidate: &str, out: &mut Vec<RuleIndex>) {
        if matches!(self.state, BuildState::Failed { .. }) {
            return;
        }
        for group in self.groups() {
            group.match_into(candidate, out);
        }
    }

    /// Whether any pattern is satisfied, trying the exact index first, then
    /// substrings, then regexes, and returning at the first hit.
    pub fn match_any(&self, candidate: &str) -> bool {
        if matches!(self.state, BuildState::Failed { .. }) {
            return false;
        }
        self.groups().any(|group| group.match_any(candidate))
    }

    /// Number of registered patterns across all kinds
    pub fn size(&self) -> RuleIndex {
        self.count
    }
}
