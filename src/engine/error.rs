//! Engine-specific error types
//!
//! This module defines the failure states of the scan/operate engine. The
//! two named conditions are part of the engine's contract with callers:
//! `NoOperationInProgress` is user-correctable (initialize first), while
//! `AllFilesProcessed` is the terminal signal that the current round is
//! complete rather than a crash.

use thiserror::Error;

/// Errors produced by the scan/operate engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// `continue_op` was called without an active session
    #[error("No operation in progress; call initialize first")]
    NoOperationInProgress,

    /// The file sequence is exhausted and no match remains
    #[error("All files processed")]
    AllFilesProcessed,

    /// Failed to assemble a session from its parts
    #[error("Failed to build session: {0}")]
    BuildError(String),

    /// I/O failure while loading or inspecting a file
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    #[must_use]
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// True when this error means the current round finished cleanly.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::AllFilesProcessed)
    }
}
