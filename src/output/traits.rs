//! Output writer trait and errors

use crate::listing::Deal;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Persists the final deal list
///
/// Called exactly once per run, after the navigator has been released.
pub trait DealWriter {
    /// Writes `deals` in the given order and returns where they went
    fn write(&self, deals: &[Deal]) -> OutputResult<PathBuf>;
}
