use thiserror::Error;

/// Errors produced while compiling or using search patterns
#[derive(Debug, Error)]
pub enum MatcherError {
    /// Empty pattern is invalid
    #[error("Empty search pattern provided")]
    InvalidEmpty,
    /// Regex failed to compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl MatcherError {
    #[must_use]
    pub fn compile(pattern: &str, reason: &str) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}
