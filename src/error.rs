//! Error types shared across the crate.

use thiserror::Error;

/// Result type for instance construction, parsing, and solver setup.
pub type Result<T> = std::result::Result<T, QkpError>;

/// Errors surfaced at the boundary of the solving core.
///
/// Solvers themselves never fail on a valid [`Instance`](crate::Instance);
/// every error here is raised before any search begins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QkpError {
    /// Structural invariant violated (empty item set, negative capacity,
    /// dimension mismatch, asymmetric interaction matrix, bad weight).
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// Solver parameter out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed instance text.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Instance file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for QkpError {
    fn from(e: std::io::Error) -> Self {
        QkpError::Io(e.to_string())
    }
}
