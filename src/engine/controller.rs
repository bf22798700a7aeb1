//! The scan/operate state machine
//!
//! The controller owns the content store, the live buffer registry, the
//! revert policy and at most one active session. `continue_op` advances the
//! machine exactly one user-visible turn: it hunts for the next interesting
//! position (skipping over files whose scan misses), runs the operate
//! action there once, and returns. Initializing a new session discards the
//! previous one.

use super::buffer::{Buffer, BufferSet, ContentStore, FsStore};
use super::error::EngineError;
use super::revert::{RevertAction, RevertPolicy};
use super::sequence::FileSequence;
use super::session::{CurrentFile, OperateFn, ScanFn, Session, Visit};

/// Drives sessions over a content store
pub struct Controller<S: ContentStore = FsStore> {
    store: S,
    buffers: BufferSet,
    revert: RevertPolicy,
    session: Option<Session>,
}

impl Controller<FsStore> {
    /// Controller over the filesystem with the default revert policy
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(FsStore)
    }
}

impl Default for Controller<FsStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ContentStore> Controller<S> {
    /// Controller over a caller-supplied content store
    #[must_use]
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            buffers: BufferSet::new(),
            revert: RevertPolicy::default(),
            session: None,
        }
    }

    /// Replace the stale-buffer policy
    pub fn set_revert_policy(&mut self, policy: RevertPolicy) {
        self.revert = policy;
    }

    /// The live buffer registry
    #[must_use]
    pub const fn buffers(&self) -> &BufferSet {
        &self.buffers
    }

    /// Whether a session is active
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start a new session from its parts, discarding any prior session
    ///
    /// # Errors
    /// Returns `EngineError::BuildError` if the session cannot be assembled.
    pub fn initialize<F, G>(
        &mut self,
        files: FileSequence,
        scan: F,
        operate: G,
    ) -> Result<(), EngineError>
    where
        F: FnMut(&mut Visit<'_>) -> bool + 'static,
        G: FnMut(&mut Visit<'_>) -> Result<bool, EngineError> + 'static,
    {
        let session = Session::builder()
            .files(files)
            .scan(scan)
            .operate(operate)
            .build()?;
        self.initialize_with(session);
        Ok(())
    }

    /// Install a fully built session, discarding any prior session
    pub fn initialize_with(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Start a search session over `files`, discarding any prior session
    ///
    /// # Errors
    /// Returns `MatcherError` if the pattern does not compile.
    pub fn initialize_search<F>(
        &mut self,
        pattern: &str,
        case: crate::matcher::CaseMode,
        files: FileSequence,
        notify: F,
    ) -> Result<(), crate::matcher::MatcherError>
    where
        F: FnMut(&super::search::MatchLocation) + 'static,
    {
        let session = super::search::search_session(pattern, case, files, notify)?;
        self.initialize_with(session);
        Ok(())
    }

    /// Start a replace session over `files`, discarding any prior session
    ///
    /// # Errors
    /// Returns `MatcherError` if the source pattern does not compile.
    pub fn initialize_replace<C, W>(
        &mut self,
        spec: &super::replace::ReplaceSpec,
        files: FileSequence,
        confirm: C,
        write_back: W,
        summary: std::rc::Rc<std::cell::RefCell<super::replace::ReplaceSummary>>,
    ) -> Result<(), crate::matcher::MatcherError>
    where
        C: FnMut(&super::replace::ReplaceCandidate) -> bool + 'static,
        W: FnMut(&std::path::Path, &str) -> std::io::Result<()> + 'static,
    {
        let session =
            super::replace::replace_session(spec, files, confirm, write_back, summary)?;
        self.initialize_with(session);
        Ok(())
    }

    /// Advance the state machine one user-visible turn
    ///
    /// Loops internally over files whose scan misses; once a scan hits, the
    /// operate action runs exactly once and the call returns. An operate
    /// action that declines to continue marks the file finished, so the
    /// next turn advances to the following file without re-scanning.
    ///
    /// # Errors
    /// * `EngineError::NoOperationInProgress` without a prior `initialize`.
    /// * `EngineError::AllFilesProcessed` once the sequence is exhausted
    ///   and no match remains; the session state is left unchanged.
    /// * `EngineError::Io` if a file cannot be resolved; the same file is
    ///   reattempted on the next turn.
    pub fn continue_op(&mut self) -> Result<(), EngineError> {
        let session = self
            .session
            .as_mut()
            .ok_or(EngineError::NoOperationInProgress)?;

        // A fresh session has nothing to re-scan, and a finished file is
        // left behind without scanning it again.
        if session.fresh || session.file_finished {
            session.fresh = false;
            session.file_finished = false;
            // The resting cursor already follows the last operate; the
            // finished file is simply left behind.
            session.current = None;
            session.saved_cursor = None;
        }

        loop {
            if self
                .session
                .as_ref()
                .is_some_and(|session| session.current.is_none())
            {
                self.advance()?;
            }

            if self.scan_step() {
                let keep_scanning = self.operate_step()?;
                if !keep_scanning {
                    let session = self.session.as_mut().expect("session is active");
                    session.file_finished = true;
                }
                return Ok(());
            }

            self.abandon_current();
        }
    }

    /// Resolve the next file of the sequence into the current visit
    fn advance(&mut self) -> Result<(), EngineError> {
        let session = self.session.as_mut().expect("session is active");

        // A file that failed to resolve last turn is retried before the
        // sequence is pulled again.
        let path = match session.pending.take() {
            Some(path) => path,
            None => session
                .files
                .next()
                .ok_or(EngineError::AllFilesProcessed)?,
        };

        if self.buffers.contains(&path) {
            if let Err(err) = self.refresh_live_buffer(&path) {
                let session = self.session.as_mut().expect("session is active");
                session.pending = Some(path);
                return Err(err);
            }
        } else {
            let ephemeral = !session.keep_open;
            match self.store.load(&path) {
                Ok((content, synced_at)) => {
                    self.buffers
                        .insert(path.clone(), Buffer::new(content, synced_at, ephemeral));
                }
                Err(err) => {
                    let io = EngineError::io(&path, err);
                    session.pending = Some(path);
                    return Err(io);
                }
            }
        }

        let session = self.session.as_mut().expect("session is active");
        session.saved_cursor = None;
        session.current = Some(CurrentFile { path, cursor: 0 });
        Ok(())
    }

    /// Synchronize an existing live buffer with disk per the revert policy
    fn refresh_live_buffer(&mut self, path: &std::path::Path) -> Result<(), EngineError> {
        let buffer = self.buffers.get_mut(path).expect("live buffer exists");
        let on_disk = self
            .store
            .mtime(path)
            .map_err(|err| EngineError::io(path, err))?;
        if !buffer.is_stale(on_disk) {
            return Ok(());
        }
        if self.revert.decide(path, buffer.modified) == RevertAction::Reload {
            let (content, synced_at) = self
                .store
                .load(path)
                .map_err(|err| EngineError::io(path, err))?;
            buffer.reload(content, synced_at);
        }
        Ok(())
    }

    /// Run the scan predicate at the current cursor
    fn scan_step(&mut self) -> bool {
        let session = self.session.as_mut().expect("session is active");
        let current = session.current.as_mut().expect("a file is current");
        let buffer = self
            .buffers
            .get_mut(&current.path)
            .expect("current buffer is live");

        // Remember where this scan started; a miss on a real visit restores
        // the position instead of leaving the cursor wherever the failed
        // scan wandered.
        session.saved_cursor = (!buffer.ephemeral).then_some(current.cursor);

        let scan: &mut ScanFn = &mut session.scan;
        let mut visit = Visit::new(&current.path, buffer, current.cursor);
        let hit = scan(&mut visit);
        current.cursor = visit.cursor();
        hit
    }

    /// Run the operate action at the current match
    fn operate_step(&mut self) -> Result<bool, EngineError> {
        let session = self.session.as_mut().expect("session is active");
        let current = session.current.as_mut().expect("a file is current");
        let buffer = self
            .buffers
            .get_mut(&current.path)
            .expect("current buffer is live");

        // An ephemeral binding being operated on becomes a real visit.
        buffer.ephemeral = false;

        let operate: &mut OperateFn = &mut session.operate;
        let mut visit = Visit::new(&current.path, buffer, current.cursor);
        let result = operate(&mut visit);
        let wrote_back = visit.wrote_back();
        current.cursor = visit.cursor();
        buffer.cursor = current.cursor;

        if wrote_back {
            // Our own write moved the on-disk timestamp; resync so the next
            // visit does not see the buffer as stale.
            if let Ok(on_disk) = self.store.mtime(&current.path) {
                buffer.synced_at = on_disk;
            }
        }

        result
    }

    /// Leave the current file after a missed scan
    ///
    /// Ephemeral bindings are discarded; persistent ones get their resting
    /// cursor restored so the abandoned visit leaves no trace.
    fn abandon_current(&mut self) {
        let session = self.session.as_mut().expect("session is active");
        let Some(current) = session.current.take() else {
            return;
        };
        let saved = session.saved_cursor.take();
        if let Some(buffer) = self.buffers.get_mut(&current.path) {
            if buffer.ephemeral {
                self.buffers.discard(&current.path);
            } else if let Some(cursor) = saved {
                buffer.cursor = cursor;
            }
        }
    }
}

impl<S: ContentStore> std::fmt::Debug for Controller<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("buffers", &self.buffers.len())
            .field("revert", &self.revert)
            .field("session", &self.session)
            .finish()
    }
}
