use std::fmt;

/// Stable identifier handed out for each registered pattern, starting at 1.
pub type RuleIndex = u32;

/// Pattern semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PatternKind {
    /// Exact match: "example.com" matches only "example.com"
    Full,
    /// Domain suffix match: "example.com" matches "example.com" and "a.example.com",
    /// never "myexample.com"
    Domain,
    /// Plain substring match, not label aware
    Substring,
    /// Regular expression match
    Regex,
}

impl PatternKind {
    /// Keyword used for this kind in rule expressions.
    pub fn prefix(&self) -> &'static str {
        match self {
            PatternKind::Full => "full",
            PatternKind::Domain => "domain",
            PatternKind::Substring => "keyword",
            PatternKind::Regex => "regexp",
        }
    }

    /// Whether this kind is served by the exact (hashed) index.
    pub fn is_exact(&self) -> bool {
        matches!(self, PatternKind::Full | PatternKind::Domain)
    }
}

/// A single matching rule before registration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    pub kind: PatternKind,
    pub text: String,
}

impl Pattern {
    pub fn new(kind: PatternKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn full(text: impl Into<String>) -> Self {
        Self::new(PatternKind::Full, text)
    }

    pub fn domain(text: impl Into<String>) -> Self {
        Self::new(PatternKind::Domain, text)
    }

    pub fn substring(text: impl Into<String>) -> Self {
        Self::new(PatternKind::Substring, text)
    }

    pub fn regex(text: impl Into<String>) -> Self {
        Self::new(PatternKind::Regex, text)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.prefix(), self.text)
    }
}
