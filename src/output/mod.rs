//! Output formatting for CLI display
//!
//! This module provides utilities for formatting search matches and
//! replace summaries, including the quiet scripting-friendly variants.

use colored::Colorize;

use crate::engine::{MatchLocation, ReplaceCandidate, ReplaceSummary};

/// Format one match for human-readable display
#[must_use]
pub fn format_match(location: &MatchLocation, quiet: bool) -> String {
    if quiet {
        return format!(
            "{}:{}:{}",
            location.path.display(),
            location.line,
            location.column
        );
    }
    let position = format!("{}:{}", location.line, location.column).dimmed();
    let line_text = location
        .line_text
        .replacen(&location.matched, &location.matched.bold().to_string(), 1);
    format!(
        "{}:{position}: {line_text}",
        location.path.display().to_string().green()
    )
}

/// Format one match as a JSON object
#[must_use]
pub fn format_match_json(location: &MatchLocation) -> String {
    serde_json::to_string(location).unwrap_or_else(|_| "{}".to_string())
}

/// Format a replace candidate for the confirmation prompt
#[must_use]
pub fn format_candidate(candidate: &ReplaceCandidate) -> String {
    format!(
        "{}:{}: {} -> {}",
        candidate.path.display().to_string().green(),
        format!("{}:{}", candidate.line, candidate.column).dimmed(),
        candidate.matched.red(),
        candidate.replacement.cyan()
    )
}

/// Format the end-of-run replace summary
#[must_use]
pub fn format_replace_summary(summary: &ReplaceSummary, dry_run: bool) -> String {
    if dry_run {
        format!(
            "Would replace {} occurrence(s) in {} file(s)",
            summary.skipped, summary.files_changed
        )
    } else {
        format!(
            "Replaced {} occurrence(s) in {} file(s), skipped {}",
            summary.replaced, summary.files_changed, summary.skipped
        )
    }
}
