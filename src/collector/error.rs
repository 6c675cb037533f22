//! Errors surfaced by collector reads.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single collector read.
///
/// Collectors keep no failure state: the next read may succeed.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The counter or info source could not be opened or read.
    #[error("source {} unavailable: {source}", .path.display())]
    SourceUnavailable { path: PathBuf, source: io::Error },

    /// The source was read but did not match the expected format.
    #[error("failed to parse {}: {message}", .path.display())]
    ParseFailure { path: PathBuf, message: String },

    /// Filesystem statistics could not be queried for the path.
    #[error("filesystem statistics unavailable for {}: {source}", .path.display())]
    PathUnavailable { path: PathBuf, source: io::Error },
}

impl CollectError {
    /// Path of the source or filesystem the failed read was aimed at.
    pub fn path(&self) -> &std::path::Path {
        match self {
            CollectError::SourceUnavailable { path, .. }
            | CollectError::ParseFailure { path, .. }
            | CollectError::PathUnavailable { path, .. } => path,
        }
    }
}
