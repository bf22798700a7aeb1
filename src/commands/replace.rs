//! Replace command - query-replace a pattern across files

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;
use std::rc::Rc;

use dialoguer::Confirm;

use crate::{
    ScourError,
    engine::{
        Controller, EngineError, ReplaceCandidate, ReplaceSpec, ReplaceSummary, RevertMode,
        replace_session,
    },
    output,
};

type Result<T> = std::result::Result<T, ScourError>;

/// How the replace command answers per-occurrence queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceAnswers {
    /// Ask interactively before each occurrence
    Interactive,
    /// Replace everything without asking
    AllYes,
    /// Report what would change, touch nothing
    DryRun,
}

/// Execute the replace command
///
/// Walks the file sequence replacing occurrences of the source pattern,
/// querying before each one unless the caller opted out, and prints a
/// summary at the end.
///
/// # Errors
/// Returns an error if the pattern does not compile or a file cannot be
/// read or written.
pub fn execute(
    spec: &ReplaceSpec,
    files: Vec<PathBuf>,
    answers: ReplaceAnswers,
    revert_mode: RevertMode,
    revertible: &[String],
    quiet: bool,
) -> Result<()> {
    let mut controller = Controller::new();
    controller.set_revert_policy(super::revert_policy(revert_mode, revertible, quiet));

    let summary = Rc::new(RefCell::new(ReplaceSummary::default()));
    let dry_run_files = Rc::new(RefCell::new(HashSet::new()));

    let candidate_files = Rc::clone(&dry_run_files);
    let confirm = move |candidate: &ReplaceCandidate| match answers {
        ReplaceAnswers::AllYes => true,
        ReplaceAnswers::DryRun => {
            println!("{}", output::format_candidate(candidate));
            candidate_files
                .borrow_mut()
                .insert(candidate.path.clone());
            false
        }
        ReplaceAnswers::Interactive => Confirm::new()
            .with_prompt(format!("{}\nReplace?", output::format_candidate(candidate)))
            .default(true)
            .interact()
            .unwrap_or(false),
    };

    let session = replace_session(
        spec,
        super::file_sequence(files),
        confirm,
        |path, content| std::fs::write(path, content),
        Rc::clone(&summary),
    )?;
    controller.initialize_with(session);

    loop {
        match controller.continue_op() {
            Ok(()) => {}
            Err(EngineError::AllFilesProcessed) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if !quiet {
        let totals = match answers {
            ReplaceAnswers::DryRun => ReplaceSummary {
                replaced: 0,
                skipped: summary.borrow().skipped,
                files_changed: dry_run_files.borrow().len(),
            },
            _ => *summary.borrow(),
        };
        println!(
            "{}",
            output::format_replace_summary(&totals, answers == ReplaceAnswers::DryRun)
        );
    }

    Ok(())
}
