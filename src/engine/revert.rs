//! Stale-buffer refresh policy
//!
//! When the engine is about to reuse a live buffer whose backing file has
//! changed on disk, `RevertPolicy` decides what happens: reload silently,
//! ask the caller, or leave the in-memory copy alone. Staleness is never an
//! error at this layer; the worst outcome is operating on the old content.

use std::path::Path;

use glob::Pattern as GlobPattern;
use serde::{Deserialize, Serialize};

/// Confirmation capability: `(path, has_unsaved_edits) -> reload?`
pub type ConfirmFn = Box<dyn FnMut(&Path, bool) -> bool>;

/// Policy mode for refreshing stale buffers
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RevertMode {
    /// Reload unmodified buffers whose path matches the revertible set
    #[default]
    Silent,
    /// Defer every reload to the confirmation capability
    #[serde(rename = "ask")]
    AlwaysAsk,
    /// Leave stale buffers untouched unconditionally
    Never,
}

/// Outcome of a policy decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertAction {
    /// Replace the buffer content with the on-disk version
    Reload,
    /// Keep the in-memory copy, stale or not
    Leave,
}

/// Decides whether stale in-memory content is refreshed from disk
pub struct RevertPolicy {
    mode: RevertMode,
    revertible: Vec<GlobPattern>,
    confirm: Option<ConfirmFn>,
}

impl RevertPolicy {
    /// Silent policy over a set of revertible glob patterns
    ///
    /// Invalid globs are skipped; an empty set means nothing reverts
    /// silently.
    #[must_use]
    pub fn silent(patterns: &[String]) -> Self {
        Self {
            mode: RevertMode::Silent,
            revertible: compile_globs(patterns),
            confirm: None,
        }
    }

    /// Ask the supplied confirmation capability before every reload
    #[must_use]
    pub fn always_ask<F>(confirm: F) -> Self
    where
        F: FnMut(&Path, bool) -> bool + 'static,
    {
        Self {
            mode: RevertMode::AlwaysAsk,
            revertible: Vec::new(),
            confirm: Some(Box::new(confirm)),
        }
    }

    /// Never reload, whatever the on-disk state
    #[must_use]
    pub fn never() -> Self {
        Self {
            mode: RevertMode::Never,
            revertible: Vec::new(),
            confirm: None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> RevertMode {
        self.mode
    }

    /// Decide what to do with a stale binding
    ///
    /// `has_unsaved_edits` is the buffer's modified flag; in `always-ask`
    /// mode it selects the prompt wording on the caller side.
    pub fn decide(&mut self, path: &Path, has_unsaved_edits: bool) -> RevertAction {
        match self.mode {
            RevertMode::Never => RevertAction::Leave,
            RevertMode::Silent => {
                if !has_unsaved_edits && self.matches_revertible(path) {
                    RevertAction::Reload
                } else {
                    RevertAction::Leave
                }
            }
            RevertMode::AlwaysAsk => {
                if let Some(confirm) = self.confirm.as_mut() {
                    if confirm(path, has_unsaved_edits) {
                        RevertAction::Reload
                    } else {
                        RevertAction::Leave
                    }
                } else {
                    RevertAction::Leave
                }
            }
        }
    }

    fn matches_revertible(&self, path: &Path) -> bool {
        self.revertible.iter().any(|p| p.matches_path(path))
    }
}

impl Default for RevertPolicy {
    fn default() -> Self {
        Self::silent(&[])
    }
}

impl std::fmt::Debug for RevertPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevertPolicy")
            .field("mode", &self.mode)
            .field("revertible", &self.revertible.len())
            .finish()
    }
}

fn compile_globs(patterns: &[String]) -> Vec<GlobPattern> {
    patterns
        .iter()
        .filter_map(|p| GlobPattern::new(p).ok())
        .collect()
}
