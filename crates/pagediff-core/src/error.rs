//! Error types for pagediff-core
//!
//! Errors from raster construction and pixel access.

use thiserror::Error;

/// pagediff-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Width or height is zero
    #[error("raster must be at least 1x1, got {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel buffer length does not match the declared dimensions
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Pixel coordinate outside the image
    #[error("pixel ({x}, {y}) outside {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Two rasters that must match in size do not
    #[error("size mismatch: {}x{} vs {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

}

/// Result type for pagediff-core
pub type Result<T> = std::result::Result<T, Error>;
