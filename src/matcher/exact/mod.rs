//! Hashed index for full and domain-suffix patterns.
//!
//! Patterns are collected first and then frozen by [`ExactIndex::build`] into a
//! hash-and-displace perfect hash table:
//! - one lookup for the whole candidate (full and domain patterns)
//! - one lookup per label boundary for domain suffixes, walking right to left
//!
//! Each lookup hashes and compares the suffix it covers, so a query costs
//! O(depth * length) no matter how many patterns are registered.
//!
//! ## Example
//!
//! ```
//! use index_matcher_r::matcher::{ExactIndex, IndexGroup};
//! use index_matcher_r::PatternKind;
//!
//! let mut index = ExactIndex::new();
//! index.add(PatternKind::Full, "example.com", 1).unwrap();
//! index.add(PatternKind::Domain, "google.com", 2).unwrap();
//! index.build().unwrap();
//!
//! let mut hits = Vec::new();
//! index.match_into("www.google.com", &mut hits);
//! assert_eq!(hits, vec![2]);
//! assert!(index.match_any("example.com"));
//! assert!(!index.match_any("myexample.com"));
//! ```

mod index;
mod mph;

pub use index::ExactIndex;
