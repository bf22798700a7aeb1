//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for scour using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **search**: Report every occurrence of a pattern across the given files
//! - **replace**: Query-replace a pattern across the given files
//! - **config**: Manage persisted defaults (set, get)
//!
//! When no files are given on the command line, the file list is read
//! lazily from stdin, one path per line, so `scour` composes with tools
//! that produce file lists.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::engine::RevertMode;
use crate::matcher::CaseMode;

/// Case-folding choice on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseArg {
    /// Insensitive unless the pattern contains an uppercase letter
    Smart,
    /// Force case-sensitive matching
    Sensitive,
    /// Force case-insensitive matching
    Insensitive,
}

impl From<CaseArg> for CaseMode {
    fn from(arg: CaseArg) -> Self {
        match arg {
            CaseArg::Smart => Self::Smart,
            CaseArg::Sensitive => Self::Sensitive,
            CaseArg::Insensitive => Self::Insensitive,
        }
    }
}

/// Output format for search results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatArg {
    /// Human-readable `path:line:col` lines
    #[default]
    Plain,
    /// One JSON object per match
    Json,
}

/// Revert policy choice on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertModeArg {
    /// Reload unmodified buffers matching the configured revertible globs
    Silent,
    /// Ask before every reload
    Ask,
    /// Never reload
    Never,
}

impl From<RevertModeArg> for RevertMode {
    fn from(arg: RevertModeArg) -> Self {
        match arg {
            RevertModeArg::Silent => Self::Silent,
            RevertModeArg::Ask => Self::AlwaysAsk,
            RevertModeArg::Never => Self::Never,
        }
    }
}

/// Top-level CLI
#[derive(Parser, Debug)]
#[command(name = "scour", version, about = "A resumable multi-file search and replace driver")]
pub struct Cli {
    /// Suppress informational output (results only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for a pattern across files
    #[command(visible_alias = "s")]
    Search {
        /// Regex pattern to search for
        pattern: String,

        /// Files to visit, in order (stdin when empty)
        files: Vec<PathBuf>,

        /// Case-folding policy (configured default when omitted)
        #[arg(long, value_enum)]
        case: Option<CaseArg>,

        /// Output format
        #[arg(long, value_enum, default_value = "plain")]
        format: FormatArg,
    },

    /// Replace a pattern across files, querying before each occurrence
    #[command(visible_alias = "r")]
    Replace {
        /// Regex source pattern
        pattern: String,

        /// Replacement text ($1-style capture references supported)
        replacement: String,

        /// Files to visit, in order (stdin when empty)
        files: Vec<PathBuf>,

        /// Case-folding policy (configured default when omitted)
        #[arg(long, value_enum)]
        case: Option<CaseArg>,

        /// Only match at word boundaries
        #[arg(long)]
        delimited: bool,

        /// Replace every occurrence without asking
        #[arg(short = 'y', long)]
        yes: bool,

        /// Report what would change without touching any file
        #[arg(long)]
        dry_run: bool,

        /// Stale-buffer policy for this run (configured default when omitted)
        #[arg(long, value_enum)]
        revert_mode: Option<RevertModeArg>,
    },

    /// Manage persisted configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set a configuration value (key=value)
    Set {
        /// Setting in key=value form
        setting: String,
    },
    /// Print a configuration value
    Get {
        /// Setting key
        key: String,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["scour", "search", "needle", "a.txt", "b.txt"]).unwrap();
        assert!(!cli.quiet);
        match cli.command {
            Commands::Search {
                pattern,
                files,
                case,
                format,
            } => {
                assert_eq!(pattern, "needle");
                assert_eq!(files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
                assert_eq!(case, None);
                assert_eq!(format, FormatArg::Plain);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_search_alias_and_flags() {
        let cli = Cli::try_parse_from([
            "scour", "-q", "s", "needle", "--case", "sensitive", "--format", "json",
        ])
        .unwrap();
        assert!(cli.quiet);
        match cli.command {
            Commands::Search { case, format, files, .. } => {
                assert_eq!(case, Some(CaseArg::Sensitive));
                assert_eq!(format, FormatArg::Json);
                assert!(files.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_replace_flags() {
        let cli = Cli::try_parse_from([
            "scour",
            "replace",
            "foo",
            "bar",
            "a.txt",
            "--delimited",
            "--yes",
            "--revert-mode",
            "never",
        ])
        .unwrap();
        match cli.command {
            Commands::Replace {
                pattern,
                replacement,
                files,
                delimited,
                yes,
                dry_run,
                revert_mode,
                ..
            } => {
                assert_eq!(pattern, "foo");
                assert_eq!(replacement, "bar");
                assert_eq!(files, vec![PathBuf::from("a.txt")]);
                assert!(delimited);
                assert!(yes);
                assert!(!dry_run);
                assert_eq!(revert_mode, Some(RevertModeArg::Never));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["scour", "config", "set", "quiet=true"]).unwrap();
        match cli.command {
            Commands::Config {
                command: ConfigCommands::Set { setting },
            } => assert_eq!(setting, "quiet=true"),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["scour", "config", "get", "revert-mode"]).unwrap();
        match cli.command {
            Commands::Config {
                command: ConfigCommands::Get { key },
            } => assert_eq!(key, "revert-mode"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_case_arg_conversion() {
        assert_eq!(CaseMode::from(CaseArg::Smart), CaseMode::Smart);
        assert_eq!(CaseMode::from(CaseArg::Sensitive), CaseMode::Sensitive);
        assert_eq!(CaseMode::from(CaseArg::Insensitive), CaseMode::Insensitive);
    }

    #[test]
    fn test_revert_mode_arg_conversion() {
        assert_eq!(RevertMode::from(RevertModeArg::Silent), RevertMode::Silent);
        assert_eq!(RevertMode::from(RevertModeArg::Ask), RevertMode::AlwaysAsk);
        assert_eq!(RevertMode::from(RevertModeArg::Never), RevertMode::Never);
    }
}
