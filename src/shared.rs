//! Published matcher handle.
//!
//! Readers take a snapshot of the current matcher and query it without
//! holding any lock; a replacement is built completely before it is swapped
//! in, so no reader ever observes a partially built index.

use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::error::Result;
use crate::mixed::MixedMatcher;
use crate::types::RuleIndex;

/// Shared, swappable reference to a built [`MixedMatcher`].
#[derive(Debug)]
pub struct SharedMatcher {
    current: RwLock<Arc<MixedMatcher>>,
}

impl SharedMatcher {
    /// Build `matcher` (if not already built) and publish it.
    pub fn new(mut matcher: MixedMatcher) -> Result<Self> {
        matcher.build()?;
        Ok(Self {
            current: RwLock::new(Arc::new(matcher)),
        })
    }

    /// Snapshot of the currently published matcher
    pub fn load(&self) -> Arc<MixedMatcher> {
        self.current.read().clone()
    }

    /// Build `matcher` and publish it in place of the current one.
    ///
    /// Returns the previously published matcher. If the build fails the
    /// published matcher is left untouched.
    pub fn replace(&self, mut matcher: MixedMatcher) -> Result<Arc<MixedMatcher>> {
        matcher.build()?;
        let next = Arc::new(matcher);
        let size = next.size();
        let previous = std::mem::replace(&mut *self.current.write(), next);
        debug!(
            "published matcher with {} rules, replacing {} rules",
            size,
            previous.size()
        );
        Ok(previous)
    }

    pub fn match_rules(&self, candidate: &str) -> Vec<RuleIndex> {
        self.load().match_rules(candidate)
    }

    pub fn match_any(&self, candidate: &str) -> bool {
        self.load().match_any(candidate)
    }
}
