//! Error types for the social graph engine

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("File not found or unreadable: {}", path.display())]
    FileUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Adjacency matrix not built")]
    NotBuilt,

    #[error("Vertex ID {id} exceeds the {limit}-vertex capacity of this store")]
    CapacityExceeded { id: usize, limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        GraphError::MalformedInput { line, reason: reason.into() }
    }

    /// Whether an interactive session can keep going after this error.
    ///
    /// `NotBuilt` means a store was queried before it was finalized, which
    /// the loader never allows. It fails the call but is still not a reason
    /// to kill the process.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GraphError::NotBuilt)
    }
}
