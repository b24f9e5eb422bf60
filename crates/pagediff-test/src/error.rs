//! Error types for pagediff-test

use thiserror::Error;

/// Failures of the harness itself, as opposed to failed checks
#[derive(Debug, Error)]
pub enum TestError {
    /// A display-mode image could not be saved
    #[error("cannot save '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// The regout directory could not be prepared
    #[error("regout I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for harness operations
pub type TestResult<T> = Result<T, TestError>;
