//! Error types for pagediff-io
//!
//! PNG and JPEG library errors are flattened into [`IoError`] strings, so
//! callers see one error type whichever codec ran.

use thiserror::Error;

/// Errors raised while decoding or encoding page images
#[derive(Debug, Error)]
pub enum IoError {
    /// Reading or writing the underlying file or stream failed
    #[error("stream error: {0}")]
    Io(#[from] std::io::Error),

    /// Neither PNG nor JPEG, or a codec layout this crate does not handle
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The buffer is too short or inconsistent with its header
    #[error("malformed image data: {0}")]
    InvalidData(String),

    /// The codec rejected the input
    #[error("cannot decode image: {0}")]
    DecodeError(String),

    /// The codec rejected the raster or settings
    #[error("cannot encode image: {0}")]
    EncodeError(String),

    /// Decoded dimensions were not a valid raster
    #[error("raster error: {0}")]
    Core(#[from] pagediff_core::Error),
}

/// Result type for image I/O
pub type IoResult<T> = Result<T, IoError>;
