//! Pre-built replace session
//!
//! The scan repositions the cursor to the start of the next occurrence so
//! the operate action finds the match ready to replace; the operate action
//! then works through the rest of the file occurrence by occurrence,
//! querying an external confirmer before each one, writes the result back
//! through an injected writer and continues to the next file.

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::error::EngineError;
use super::sequence::FileSequence;
use super::session::Session;
use crate::matcher::{CaseMode, Matcher, MatcherError, locate};

/// Per-occurrence confirmation capability
pub type ConfirmReplaceFn = Box<dyn FnMut(&ReplaceCandidate) -> bool>;

/// Write-back capability invoked once per changed file
pub type WriteBackFn = Box<dyn FnMut(&Path, &str) -> io::Result<()>>;

/// What a replace session is about to do at one occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceCandidate {
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
    /// The matched text about to be replaced
    pub matched: String,
    /// The expanded replacement (capture groups resolved)
    pub replacement: String,
    pub line_text: String,
}

/// Source pattern and replacement for a replace session
#[derive(Debug, Clone)]
pub struct ReplaceSpec {
    pub pattern: String,
    pub replacement: String,
    pub case: CaseMode,
    /// Constrain matches to word boundaries
    pub delimited: bool,
}

/// Running totals across a replace session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceSummary {
    pub replaced: usize,
    pub skipped: usize,
    pub files_changed: usize,
}

/// Build a session that replaces occurrences across files
///
/// Replacements support `$1`-style capture references. The shared summary
/// handle accumulates totals the caller can read once the session is done.
///
/// # Errors
/// Returns `MatcherError` if the source pattern does not compile.
pub fn replace_session<C, W>(
    spec: &ReplaceSpec,
    files: FileSequence,
    confirm: C,
    write_back: W,
    summary: Rc<RefCell<ReplaceSummary>>,
) -> Result<Session, MatcherError>
where
    C: FnMut(&ReplaceCandidate) -> bool + 'static,
    W: FnMut(&Path, &str) -> io::Result<()> + 'static,
{
    let matcher = Matcher::new(&spec.pattern, spec.case, spec.delimited)?;
    let scan_matcher = matcher.clone();
    let replacement = spec.replacement.clone();
    let mut confirm: ConfirmReplaceFn = Box::new(confirm);
    let mut write_back: WriteBackFn = Box::new(write_back);

    let session = Session::builder()
        .files(files)
        .scan(move |visit| {
            match scan_matcher.find_from(visit.content(), visit.cursor()) {
                // A zero-width match at the end of the content cannot be
                // stepped past, so it counts as no match.
                Some(span) if span.is_empty() && span.start >= visit.content().len() => false,
                Some(span) => {
                    // Leave the cursor on the match so operate sees it first.
                    visit.set_cursor(span.start);
                    true
                }
                None => false,
            }
        })
        .operate(move |visit| {
            loop {
                let Some((start, end, expanded)) = next_candidate(&matcher, visit.content(), visit.cursor(), &replacement)
                else {
                    break;
                };

                let (line, column, line_text) = locate(visit.content(), start);
                let candidate = ReplaceCandidate {
                    path: visit.path().to_path_buf(),
                    line,
                    column,
                    matched: visit.content()[start..end].to_string(),
                    replacement: expanded.clone(),
                    line_text,
                };

                if confirm(&candidate) {
                    visit.splice(start, end, &expanded);
                    summary.borrow_mut().replaced += 1;
                } else {
                    visit.set_cursor(end);
                    summary.borrow_mut().skipped += 1;
                }
                if start == end {
                    // Zero-width occurrence: step past one char to force
                    // progress, or stop at the end of the content.
                    if visit.cursor() >= visit.content().len() {
                        break;
                    }
                    visit.advance_char();
                }
            }

            if visit.is_modified() {
                write_back(visit.path(), visit.content())
                    .map_err(|err| EngineError::io(visit.path(), err))?;
                visit.mark_written();
                summary.borrow_mut().files_changed += 1;
            }
            Ok(true)
        })
        .build()
        .expect("replace session has all required parts");

    Ok(session)
}

fn next_candidate(
    matcher: &Matcher,
    content: &str,
    cursor: usize,
    replacement: &str,
) -> Option<(usize, usize, String)> {
    let caps = matcher.captures_from(content, cursor)?;
    let whole = caps.get(0).expect("group 0 always present");
    let expanded = Matcher::expand(&caps, replacement);
    Some((whole.start(), whole.end(), expanded))
}
