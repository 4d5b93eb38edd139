use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use crate::error::{MatcherError, Result};
use crate::types::{Pattern, PatternKind};

/// Regex pattern for prefixed rule expressions
/// Format: kind:body
static EXPRESSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(full|domain|keyword|regexp):(.*)$")
        .expect("EXPRESSION_PATTERN: hardcoded regex is invalid")
});

/// Parse a single rule expression.
///
/// | Expression | Kind |
/// |------------|------|
/// | `full:example.com` | Full |
/// | `domain:example.com` | Domain |
/// | `keyword:ads` | Substring |
/// | `regexp:^ads\.` | Regex |
/// | `example.com` | Domain |
///
/// Regex bodies are not compiled here; that happens on registration.
pub fn parse_pattern(expr: &str) -> Result<Pattern> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(MatcherError::InvalidPattern("empty expression".to_string()));
    }

    let (kind, body) = match EXPRESSION_PATTERN.captures(expr) {
        Some(caps) => {
            let kind = match &caps[1] {
                "full" => PatternKind::Full,
                "domain" => PatternKind::Domain,
                "keyword" => PatternKind::Substring,
                _ => PatternKind::Regex,
            };
            let body = caps.get(2).map_or("", |m| m.as_str());
            // Whitespace can be significant inside a regex.
            let body = if kind == PatternKind::Regex {
                body
            } else {
                body.trim()
            };
            (kind, body)
        }
        None => (PatternKind::Domain, expr),
    };

    if body.is_empty() {
        return Err(MatcherError::InvalidPattern(format!(
            "empty {} expression",
            kind.prefix()
        )));
    }

    Ok(Pattern::new(kind, body))
}

/// Parse a list of rule expressions, one per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_patterns(text: &str) -> Result<Vec<Pattern>> {
    let mut patterns = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1; // 1-based line numbers
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let pattern = parse_pattern(line).map_err(|e| MatcherError::ParseErrorAtLine {
            line: line_num,
            message: e.to_string(),
        })?;
        patterns.push(pattern);
    }

    Ok(patterns)
}

impl FromStr for Pattern {
    type Err = MatcherError;

    fn from_str(s: &str) -> Result<Self> {
        parse_pattern(s)
    }
}
