//! Error types for pagediff-diff

use pagediff_io::IoError;
use thiserror::Error;

/// Errors that can occur while comparing two pages
#[derive(Debug, Error)]
pub enum DiffError {
    /// Core library error
    #[error("core error: {0}")]
    Core(pagediff_core::Error),

    /// An input image has zero width or height
    #[error("invalid input: image has zero size ({width}x{height})")]
    InvalidInput { width: u32, height: u32 },

    /// The two images are not the same size
    #[error("dimension mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// An encoded input could not be decoded
    #[error("decode failure: {0}")]
    DecodeFailure(IoError),

    /// An output image could not be encoded
    #[error("encode failure: {0}")]
    EncodeFailure(IoError),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The comparison was cancelled before it finished
    #[error("comparison cancelled")]
    Cancelled,
}

impl From<pagediff_core::Error> for DiffError {
    fn from(e: pagediff_core::Error) -> Self {
        match e {
            pagediff_core::Error::InvalidDimension { width, height } => {
                DiffError::InvalidInput { width, height }
            }
            pagediff_core::Error::DimensionMismatch { expected, actual } => {
                DiffError::DimensionMismatch { expected, actual }
            }
            other => DiffError::Core(other),
        }
    }
}

/// Result type for diff operations
pub type DiffResult<T> = Result<T, DiffError>;
