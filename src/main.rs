//! Scour CLI application entry point
//!
//! This is the main executable for the scour multi-file search and replace
//! driver. It visits an ordered list of files (given on the command line
//! or piped in one per line), scans each for a pattern, and either reports
//! matches or performs query-replace style substitution.
//!
//! # Usage
//!
//! ```bash
//! # Search files for a pattern
//! scour search "TODO" src/main.rs src/lib.rs
//!
//! # Pipe in a file list and search it
//! git ls-files '*.rs' | scour search "unwrap\(\)"
//!
//! # Query-replace across files, confirming each occurrence
//! scour replace "old_name" "new_name" src/*.rs
//!
//! # Replace everything without asking, whole words only
//! scour replace -y --delimited "foo" "bar" notes.txt
//!
//! # See what would change without touching anything
//! scour replace --dry-run "foo" "bar" notes.txt
//!
//! # Quiet mode (only output results)
//! scour -q search "foo" a.txt
//! ```
//!
//! # Configuration
//!
//! Defaults (quiet mode, case folding, revert policy) are stored in the
//! user's config directory (`~/.config/scour/config.toml` on Linux).

use scour::{
    ScourError,
    cli::{Cli, Commands},
    commands,
    config::ScourConfig,
    engine::ReplaceSpec,
};

type Result<T> = std::result::Result<T, ScourError>;

/// Main entry point for the scour application
///
/// Loads configuration, parses command-line arguments, and dispatches to
/// the appropriate command handler.
///
/// # Errors
///
/// Returns `ScourError` if configuration loading fails or any command
/// handler returns an error.
fn main() -> Result<()> {
    let config = ScourConfig::load()?;

    let cli = Cli::parse_args();

    let quiet = cli.quiet || config.quiet;

    match cli.command {
        Commands::Search {
            pattern,
            files,
            case,
            format,
        } => {
            let case = case.map_or(config.case, Into::into);
            commands::search::execute(
                &pattern,
                files,
                case,
                format,
                config.revert_mode,
                &config.revertible,
                quiet,
            )?;
        }
        Commands::Replace {
            pattern,
            replacement,
            files,
            case,
            delimited,
            yes,
            dry_run,
            revert_mode,
        } => {
            let spec = ReplaceSpec {
                pattern,
                replacement,
                case: case.map_or(config.case, Into::into),
                delimited,
            };
            let answers = if dry_run {
                commands::replace::ReplaceAnswers::DryRun
            } else if yes || quiet {
                commands::replace::ReplaceAnswers::AllYes
            } else {
                commands::replace::ReplaceAnswers::Interactive
            };
            let revert_mode = revert_mode.map_or(config.revert_mode, Into::into);
            commands::replace::execute(
                &spec,
                files,
                answers,
                revert_mode,
                &config.revertible,
                quiet,
            )?;
        }
        Commands::Config { command } => {
            commands::config::execute(config, &command, quiet)?;
        }
    }

    Ok(())
}
