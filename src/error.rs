use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Removing an item that the worker does not hold. Only the speculative
    /// evaluation path removes items, so this always means broken bookkeeping.
    #[error("Item not found on worker {worker}")]
    ItemNotFound { worker: usize },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("No *.{extension} files found in {}", .dir.display())]
    NoMatchingFiles { dir: PathBuf, extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SplitError {
    /// Errors caused by a bad command line rather than a failure while running.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            SplitError::NotADirectory(_) | SplitError::NoMatchingFiles { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
