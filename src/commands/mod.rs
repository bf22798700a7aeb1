//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and drives the engine.

pub mod config;
pub mod replace;
pub mod search;

use std::path::{Path, PathBuf};

use colored::Colorize;
use dialoguer::Confirm;

use crate::engine::{FileSequence, RevertMode, RevertPolicy};

/// Build the file sequence for a command invocation
///
/// An explicit file list is visited in the given order; with no files the
/// sequence pulls paths lazily from stdin, one per line.
#[must_use]
pub fn file_sequence(files: Vec<PathBuf>) -> FileSequence {
    if files.is_empty() {
        let mut lines = std::io::stdin().lines();
        FileSequence::from_generator(move || {
            for line in lines.by_ref() {
                let Ok(line) = line else { return None };
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    return Some(PathBuf::from(trimmed));
                }
            }
            None
        })
    } else {
        FileSequence::from_list(files)
    }
}

/// Build the revert policy for a command invocation
///
/// `ask` mode prompts interactively, with wording that depends on whether
/// the in-memory copy carries unsaved edits; in quiet mode the stale copy
/// is kept without prompting.
#[must_use]
pub fn revert_policy(mode: RevertMode, revertible: &[String], quiet: bool) -> RevertPolicy {
    match mode {
        RevertMode::Silent => RevertPolicy::silent(revertible),
        RevertMode::Never => RevertPolicy::never(),
        RevertMode::AlwaysAsk => RevertPolicy::always_ask(move |path: &Path, has_edits| {
            if quiet {
                return false;
            }
            let prompt = if has_edits {
                format!(
                    "{} changed on disk; discard your edits and reread?",
                    path.display().to_string().yellow()
                )
            } else {
                format!(
                    "{} changed on disk; reread it?",
                    path.display().to_string().yellow()
                )
            };
            Confirm::new()
                .with_prompt(prompt)
                .default(!has_edits)
                .interact()
                .unwrap_or(false)
        }),
    }
}
