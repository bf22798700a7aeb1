//! Scour - a resumable multi-file search and replace driver
//!
//! This library provides the engine behind cross-file query-replace style
//! workflows: visit each file of an ordered sequence, scan it for something
//! of interest, and hand control to an operate action whenever a scan hits.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod output;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ScourError {
    /// Engine error
    #[error("Engine error: {0}")]
    EngineError(#[from] engine::EngineError),
    /// Pattern error
    #[error("Pattern error: {0}")]
    MatcherError(#[from] matcher::MatcherError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
