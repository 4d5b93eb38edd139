pub mod exact;
mod regexp;
mod substring;

pub use exact::ExactIndex;
pub use regexp::RegexIndex;
pub use substring::SubstringIndex;

use crate::types::RuleIndex;

/// Trait for sub-indexes queried by the mixed matcher
pub trait IndexGroup: Send + Sync {
    /// Append the rule index of every pattern satisfied by `candidate`.
    fn match_into(&self, candidate: &str, out: &mut Vec<RuleIndex>);

    /// Check if `candidate` satisfies any pattern, stopping at the first hit.
    fn match_any(&self, candidate: &str) -> bool;

    /// Number of patterns registered in this index
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
