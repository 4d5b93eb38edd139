//! Index Matcher - multi-strategy domain classification for proxy rule routing
//!
//! This library answers "which registered rules does this string satisfy" for
//! hostnames, SNI values and resolved domains, with support for:
//! - Full (exact) matching
//! - Domain suffix matching, anchored at label boundaries
//! - Substring (keyword) matching via Aho-Corasick
//! - Regular expression matching
//!
//! Full and domain patterns, which dominate real rule sets, are frozen into a
//! perfect hash table so a lookup costs the same for ten rules or a hundred
//! thousand.
//!
//! # Example
//!
//! ```rust
//! use index_matcher_r::{MixedMatcher, Pattern};
//!
//! let mut matcher = MixedMatcher::new();
//! let google = matcher.add(Pattern::domain("google.com")).unwrap();
//! let ads = matcher.add(Pattern::regex(r"^ads\.")).unwrap();
//! matcher.add_expression("keyword:track").unwrap();
//!
//! // Freeze before serving traffic
//! matcher.build().unwrap();
//!
//! assert_eq!(matcher.match_rules("mail.google.com"), vec![google]);
//! assert_eq!(matcher.match_rules("ads.example.com"), vec![ads]);
//! assert!(matcher.match_any("tracker.net"));
//! assert!(!matcher.match_any("notgoogle.com"));
//! ```
//!
//! # Rule Expressions
//!
//! | Expression | Kind | Matches |
//! |------------|------|---------|
//! | `full:example.com` | Full | `example.com` only |
//! | `domain:example.com` | Domain | `example.com`, `a.example.com` |
//! | `keyword:track` | Substring | `tracker.net`, `a.track.io` |
//! | `regexp:^ads\.` | Regex | `ads.example.com` |
//! | `example.com` | Domain | same as `domain:` |
//!
//! Candidates must be normalized by the caller (lowercase, no trailing dot).

pub mod error;
pub mod matcher;
pub mod mixed;
pub mod parser;
pub mod shared;
pub mod types;

// Re-export commonly used items
pub use error::{BuildErrorKind, MatcherError, Result};
pub use matcher::{ExactIndex, IndexGroup, RegexIndex, SubstringIndex};
pub use mixed::MixedMatcher;
pub use parser::{parse_pattern, parse_patterns};
pub use shared::SharedMatcher;
pub use types::{Pattern, PatternKind, RuleIndex};
