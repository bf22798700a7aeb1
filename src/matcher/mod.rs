//! Compiled search patterns with case policy and word delimiting
//!
//! A `Matcher` wraps one compiled regex together with the case-folding
//! decision made at construction time. Searches are cursor-aware: they run
//! from a byte offset into the full haystack so anchors keep their meaning.

pub mod error;

pub use error::MatcherError;

use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Case-folding policy for a pattern
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Insensitive unless the pattern contains an uppercase letter
    #[default]
    Smart,
    /// Force case-sensitive matching
    Sensitive,
    /// Force case-insensitive matching
    Insensitive,
}

impl CaseMode {
    /// Resolve the policy against a concrete pattern
    #[must_use]
    pub fn folds(self, pattern: &str) -> bool {
        match self {
            Self::Sensitive => false,
            Self::Insensitive => true,
            Self::Smart => !pattern.chars().any(char::is_uppercase),
        }
    }
}

/// A matched span, in byte offsets into the haystack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One compiled search pattern
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile `pattern` under the given case policy
    ///
    /// With `delimited`, the pattern only matches at word boundaries.
    ///
    /// # Errors
    /// * Returns `MatcherError::InvalidEmpty` if `pattern` is empty.
    /// * Returns `MatcherError::InvalidPattern` if compilation fails.
    pub fn new(pattern: &str, case: CaseMode, delimited: bool) -> Result<Self, MatcherError> {
        if pattern.is_empty() {
            return Err(MatcherError::InvalidEmpty);
        }
        let source = if delimited {
            format!(r"\b(?:{pattern})\b")
        } else {
            pattern.to_string()
        };
        let regex = RegexBuilder::new(&source)
            .case_insensitive(case.folds(pattern))
            .build()
            .map_err(|e| MatcherError::compile(pattern, &e.to_string()))?;
        Ok(Self { regex })
    }

    /// Find the next match at or after `start`
    #[must_use]
    pub fn find_from(&self, haystack: &str, start: usize) -> Option<MatchSpan> {
        self.regex.find_at(haystack, start).map(|m| MatchSpan {
            start: m.start(),
            end: m.end(),
        })
    }

    /// Capture the next match at or after `start`
    #[must_use]
    pub fn captures_from<'t>(&self, haystack: &'t str, start: usize) -> Option<Captures<'t>> {
        self.regex.captures_at(haystack, start)
    }

    /// Expand `replacement` against captured groups (`$1`, `$name`, ...)
    #[must_use]
    pub fn expand(caps: &Captures<'_>, replacement: &str) -> String {
        let mut dst = String::new();
        caps.expand(replacement, &mut dst);
        dst
    }
}

/// Locate `offset` within `content` as 1-based line/column plus line text
#[must_use]
pub fn locate(content: &str, offset: usize) -> (usize, usize, String) {
    let offset = offset.min(content.len());
    let before = &content[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |p| p + 1);
    let column = content[line_start..offset].chars().count() + 1;
    let line_end = content[line_start..]
        .find('\n')
        .map_or(content.len(), |p| line_start + p);
    (line, column, content[line_start..line_end].to_string())
}
