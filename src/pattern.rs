/// Wildcard URL pattern compiler
///
/// Patterns use `*` as "any sequence of characters, including none" and are
/// matched against the whole URL. A bare host-style pattern such as
/// `github.com/*` is widened to `*://github.com/*` so it matches any scheme.
use regex::Regex;

use crate::error::{Result, TabError};

const SCHEME_SEPARATOR: &str = "://";
const ANY_SCHEME_PREFIX: &str = "*://";

/// Characters that carry meaning in a regex, minus `*` which is the wildcard
const METACHARACTERS: &[char] = &[
    '.', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

/// A compiled, anchored URL predicate
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Normalize and compile a trimmed, non-empty pattern
    pub fn compile(pattern: &str) -> Result<CompiledPattern> {
        let pattern = normalize_pattern(pattern);
        let source = pattern_to_regex_source(&pattern);
        let regex = build_regex(&pattern, &source)?;

        Ok(CompiledPattern { pattern, regex })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// The pattern after scheme normalization
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[cfg(test)]
    pub fn regex_source(&self) -> &str {
        self.regex.as_str()
    }
}

/// Prefix `*://` unless the pattern names a scheme or already starts with `*`
pub fn normalize_pattern(pattern: &str) -> String {
    if pattern.contains(SCHEME_SEPARATOR) || pattern.starts_with('*') {
        pattern.to_string()
    } else {
        format!("{}{}", ANY_SCHEME_PREFIX, pattern)
    }
}

/// Escape, substitute wildcards, anchor
pub fn pattern_to_regex_source(pattern: &str) -> String {
    let escaped = escape_metacharacters(pattern);
    let body = substitute_wildcards(&escaped);
    format!("^{}$", body)
}

fn escape_metacharacters(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len() * 2);
    for c in pattern.chars() {
        if METACHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// Escaping never introduces a `*`, so every `*` left is a user wildcard
fn substitute_wildcards(escaped: &str) -> String {
    escaped.replace('*', ".*")
}

fn build_regex(pattern: &str, source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|e| TabError::PatternSyntax {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
