use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the codex-stats pipeline.
///
/// Only [`StatsError::PathNotFound`] is fatal for the program as a whole;
/// the other variants are caught at the per-file boundary, logged, and
/// converted into "no records from this file".
#[derive(Error, Debug)]
pub enum StatsError {
    /// The root directory given on the command line does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// A log file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Pass-through for raw I/O errors that do not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the codex-stats crates.
pub type Result<T> = std::result::Result<T, StatsError>;
