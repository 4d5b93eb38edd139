use thiserror::Error;

/// Classifies index build failures for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildErrorKind {
    /// More distinct keys than the slot space can address
    TooManyKeys,
    /// No displacement seed placed a hash bucket within the attempt budget
    SeedExhausted,
    /// The substring automaton could not be constructed
    Automaton,
}

/// Index matcher error types
#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Regex error in pattern '{pattern}': {source}")]
    RegexCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Build error: {message}")]
    BuildFailure {
        kind: BuildErrorKind,
        message: String,
    },

    #[error("Matcher is already built, no further patterns can be added")]
    AlreadyBuilt,

    #[error("Rule index space exhausted")]
    IndexOverflow,

    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },
}

impl MatcherError {
    pub(crate) fn build(kind: BuildErrorKind, message: impl Into<String>) -> Self {
        MatcherError::BuildFailure {
            kind,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;
