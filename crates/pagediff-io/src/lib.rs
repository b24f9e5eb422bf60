//! pagediff-io - Image I/O for pagediff
//!
//! This crate is the raster decoder/encoder boundary of the detector.
//! The comparison pipeline works on decoded [`Raster`] buffers only; this
//! crate turns encoded bytes into rasters and back.
//!
//! - **PNG**: lossless, alpha-preserving (used for the diff mask)
//! - **JPEG**: lossy with a quality setting (used for annotated pages)
//!
//! # Example
//!
//! ```
//! use pagediff_core::{Color, Raster};
//! use pagediff_io::{ImageFormat, read_image_mem, write_image_mem};
//!
//! let raster = Raster::new_filled(8, 8, Color::MAGENTA).unwrap();
//! let bytes = write_image_mem(&raster, ImageFormat::Png).unwrap();
//! let back = read_image_mem(&bytes).unwrap();
//! assert_eq!(back, raster);
//! ```

mod error;
pub mod format;
pub mod jpeg;
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use jpeg::{DEFAULT_JPEG_QUALITY, read_jpeg, write_jpeg};
pub use png::{read_png, write_png};

use pagediff_core::Raster;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path, detecting the format from its header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let format = detect_format(&path)?;
    let reader = BufReader::new(File::open(path)?);
    match format {
        ImageFormat::Png => read_png(reader),
        ImageFormat::Jpeg => read_jpeg(reader),
    }
}

/// Read an image from memory, detecting the format from its header.
pub fn read_image_mem(data: &[u8]) -> IoResult<Raster> {
    match detect_format_from_bytes(data)? {
        ImageFormat::Png => read_png(Cursor::new(data)),
        ImageFormat::Jpeg => read_jpeg(Cursor::new(data)),
    }
}

/// Write an image to a writer. JPEG output uses [`DEFAULT_JPEG_QUALITY`].
pub fn write_image_to<W: Write>(raster: &Raster, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        ImageFormat::Png => write_png(raster, writer),
        ImageFormat::Jpeg => write_jpeg(raster, writer, DEFAULT_JPEG_QUALITY),
    }
}

/// Write an image to a file path.
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_to(raster, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into a new byte buffer.
pub fn write_image_mem(raster: &Raster, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_to(raster, &mut buffer, format)?;
    Ok(buffer)
}
