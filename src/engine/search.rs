//! Pre-built search session
//!
//! Wires a compiled pattern into a scan/operate pair: the scan finds the
//! next occurrence at or after the cursor, the operate action hands the
//! match location to an external notifier and always continues, so a
//! search proceeds match-by-match, file-by-file, until exhaustion.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use serde::Serialize;

use super::sequence::FileSequence;
use super::session::Session;
use crate::matcher::{CaseMode, MatchSpan, Matcher, MatcherError, locate};

/// Notifier invoked once per reported match
pub type NotifyFn = Box<dyn FnMut(&MatchLocation)>;

/// One reported occurrence of the search pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchLocation {
    pub path: PathBuf,
    /// Byte offset of the match start within the file content
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column (in chars) within the line
    pub column: usize,
    /// Text of the line containing the match
    pub line_text: String,
    /// The matched text itself
    pub matched: String,
}

/// Build a session that reports every occurrence of `pattern`
///
/// # Errors
/// Returns `MatcherError` if the pattern does not compile.
pub fn search_session<F>(
    pattern: &str,
    case: CaseMode,
    files: FileSequence,
    notify: F,
) -> Result<Session, MatcherError>
where
    F: FnMut(&MatchLocation) + 'static,
{
    let matcher = Matcher::new(pattern, case, false)?;
    let mut notify: NotifyFn = Box::new(notify);

    // The scan leaves the cursor past the match; the span itself travels to
    // the operate action through this slot.
    let found: Rc<Cell<Option<MatchSpan>>> = Rc::new(Cell::new(None));
    let seen = Rc::clone(&found);

    let session = Session::builder()
        .files(files)
        .scan(move |visit| match matcher.find_from(visit.content(), visit.cursor()) {
            Some(span) => {
                // A zero-width match the cursor cannot step past is treated
                // as no match; anywhere else the cursor skips one char so
                // it strictly progresses.
                if span.is_empty() && span.end >= visit.content().len() {
                    return false;
                }
                visit.set_cursor(span.end);
                if span.is_empty() {
                    visit.advance_char();
                }
                found.set(Some(span));
                true
            }
            None => false,
        })
        .operate(move |visit| {
            if let Some(span) = seen.take() {
                let (line, column, line_text) = locate(visit.content(), span.start);
                let location = MatchLocation {
                    path: visit.path().to_path_buf(),
                    offset: span.start,
                    line,
                    column,
                    line_text,
                    matched: visit.content()[span.start..span.end].to_string(),
                };
                notify(&location);
            }
            Ok(true)
        })
        .build()
        .expect("search session has all required parts");

    Ok(session)
}
