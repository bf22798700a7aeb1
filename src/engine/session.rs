//! Session state and builder
//!
//! A `Session` bundles everything one round of multi-file operation needs:
//! the file sequence, the scan predicate, the operate action and the
//! bookkeeping flags the controller mutates on every step. Use
//! `Session::builder()` to construct one:
//!
//! ```no_run
//! use scour::engine::{FileSequence, Session};
//!
//! # fn example() -> Result<(), scour::engine::EngineError> {
//! let session = Session::builder()
//!     .files(FileSequence::from_list(["a.txt", "b.txt"]))
//!     .scan(|visit| visit.rest().contains("TODO"))
//!     .operate(|_visit| Ok(false))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use super::buffer::Buffer;
use super::error::EngineError;
use super::sequence::FileSequence;

/// Scan predicate: test the current content from the cursor onward
///
/// May move the cursor; must be idempotent when re-invoked at the same
/// cursor without intervening mutation, and must leave the cursor strictly
/// past the previous match on success.
pub type ScanFn = Box<dyn FnMut(&mut Visit<'_>) -> bool>;

/// Operate action: perform work at the current match
///
/// Returns `Ok(true)` to keep scanning the same file for more matches, or
/// `Ok(false)` to move on to the next file on the following turn.
pub type OperateFn = Box<dyn FnMut(&mut Visit<'_>) -> Result<bool, EngineError>>;

/// The ambient "current content" context handed to scan and operate
///
/// Wraps the live buffer of the file being visited together with the visit
/// cursor (a byte offset, always on a char boundary).
pub struct Visit<'a> {
    path: &'a Path,
    buffer: &'a mut Buffer,
    cursor: usize,
    wrote_back: bool,
}

impl<'a> Visit<'a> {
    pub(crate) fn new(path: &'a Path, buffer: &'a mut Buffer, cursor: usize) -> Self {
        Self {
            path,
            buffer,
            cursor,
            wrote_back: false,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.path
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.buffer.content
    }

    /// Content from the cursor to the end
    #[must_use]
    pub fn rest(&self) -> &str {
        &self.buffer.content[self.cursor..]
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `pos` (clamped to the content length)
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.buffer.content.len());
    }

    /// Advance the cursor over one char, if any remains
    pub fn advance_char(&mut self) {
        if let Some(c) = self.buffer.content[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.buffer.modified
    }

    /// Replace `start..end` with `replacement`, marking the buffer modified
    ///
    /// Leaves the cursor just past the inserted text so scanning resumes
    /// after the replacement.
    pub fn splice(&mut self, start: usize, end: usize, replacement: &str) {
        self.buffer.content.replace_range(start..end, replacement);
        self.buffer.modified = true;
        self.cursor = start + replacement.len();
    }

    /// Record that the operate action persisted the content
    ///
    /// Clears the modified flag; the controller refreshes the synced
    /// timestamp once the action returns.
    pub fn mark_written(&mut self) {
        self.buffer.modified = false;
        self.wrote_back = true;
    }

    pub(crate) const fn wrote_back(&self) -> bool {
        self.wrote_back
    }
}

/// Position within the file currently being visited
#[derive(Debug, Clone)]
pub(crate) struct CurrentFile {
    pub path: PathBuf,
    pub cursor: usize,
}

/// The mutable configuration bundle for one round of multi-file operation
pub struct Session {
    pub(crate) files: FileSequence,
    pub(crate) scan: ScanFn,
    pub(crate) operate: OperateFn,
    /// True immediately after creation, cleared on the first turn
    pub(crate) fresh: bool,
    /// True after an operate action declined to continue
    pub(crate) file_finished: bool,
    /// Keep every visited binding persistent instead of scan-only ephemeral
    pub(crate) keep_open: bool,
    pub(crate) current: Option<CurrentFile>,
    /// File pulled from the sequence but not yet resolved (I/O retry slot)
    pub(crate) pending: Option<PathBuf>,
    /// Resting cursor to restore when the current visit is abandoned
    pub(crate) saved_cursor: Option<usize>,
}

impl Session {
    /// Create a new builder for constructing a `Session`
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("files", &self.files)
            .field("fresh", &self.fresh)
            .field("file_finished", &self.file_finished)
            .field("keep_open", &self.keep_open)
            .field("current", &self.current)
            .field("pending", &self.pending)
            .finish()
    }
}

/// Builder for `Session`
pub struct SessionBuilder {
    files: Option<FileSequence>,
    scan: Option<ScanFn>,
    operate: Option<OperateFn>,
    keep_open: bool,
}

impl SessionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: None,
            scan: None,
            operate: None,
            keep_open: false,
        }
    }

    /// Set the file sequence to visit (required)
    #[must_use]
    pub fn files(mut self, files: FileSequence) -> Self {
        self.files = Some(files);
        self
    }

    /// Set the scan predicate (required)
    #[must_use]
    pub fn scan<F>(mut self, scan: F) -> Self
    where
        F: FnMut(&mut Visit<'_>) -> bool + 'static,
    {
        self.scan = Some(Box::new(scan));
        self
    }

    /// Set the operate action (required)
    #[must_use]
    pub fn operate<F>(mut self, operate: F) -> Self
    where
        F: FnMut(&mut Visit<'_>) -> Result<bool, EngineError> + 'static,
    {
        self.operate = Some(Box::new(operate));
        self
    }

    /// Keep visited bindings live instead of discarding scan-only misses
    #[must_use]
    pub const fn keep_open(mut self, keep_open: bool) -> Self {
        self.keep_open = keep_open;
        self
    }

    /// Build the `Session`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::BuildError` if the file sequence, scan
    /// predicate or operate action is missing.
    pub fn build(self) -> Result<Session, EngineError> {
        let files = self
            .files
            .ok_or_else(|| EngineError::BuildError("File sequence is required".to_string()))?;
        let scan = self
            .scan
            .ok_or_else(|| EngineError::BuildError("Scan predicate is required".to_string()))?;
        let operate = self
            .operate
            .ok_or_else(|| EngineError::BuildError("Operate action is required".to_string()))?;

        Ok(Session {
            files,
            scan,
            operate,
            fresh: true,
            file_finished: false,
            keep_open: self.keep_open,
            current: None,
            pending: None,
            saved_cursor: None,
        })
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
