//! Search command - report every occurrence of a pattern across files

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::{
    ScourError,
    cli::FormatArg,
    engine::{Controller, EngineError, MatchLocation, RevertMode, search_session},
    matcher::CaseMode,
    output,
};

type Result<T> = std::result::Result<T, ScourError>;

/// Execute the search command
///
/// Visits every file of the sequence in order, printing each match as it
/// is found, and finishes once the sequence is exhausted.
///
/// # Errors
/// Returns an error if the pattern does not compile or a file cannot be
/// read.
pub fn execute(
    pattern: &str,
    files: Vec<PathBuf>,
    case: CaseMode,
    format: FormatArg,
    revert_mode: RevertMode,
    revertible: &[String],
    quiet: bool,
) -> Result<()> {
    let mut controller = Controller::new();
    controller.set_revert_policy(super::revert_policy(revert_mode, revertible, quiet));

    let count = Rc::new(RefCell::new(0usize));
    let tally = Rc::clone(&count);
    let session = search_session(
        pattern,
        case,
        super::file_sequence(files),
        move |location: &MatchLocation| {
            *tally.borrow_mut() += 1;
            match format {
                FormatArg::Plain => println!("{}", output::format_match(location, quiet)),
                FormatArg::Json => println!("{}", output::format_match_json(location)),
            }
        },
    )?;
    controller.initialize_with(session);

    loop {
        match controller.continue_op() {
            Ok(()) => {}
            Err(EngineError::AllFilesProcessed) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if !quiet && format == FormatArg::Plain {
        let total = *count.borrow();
        if total == 0 {
            println!("No matches for '{pattern}'");
        } else {
            println!("\nFound {total} match(es) for '{pattern}'");
        }
    }

    Ok(())
}
