//! Input format sniffing
//!
//! Page images arrive as opaque byte buffers; the leading signature bytes
//! decide which decoder runs.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PNG file signature
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];
/// JPEG start-of-image marker followed by the next marker's prefix
const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Encoded image formats handled by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Lossless, alpha-preserving; used for diff masks
    #[default]
    Png,
    /// Lossy, opaque; used for annotated pages
    Jpeg,
}

impl ImageFormat {
    /// Conventional file extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }

    /// Media type for transport headers
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Sniff the format of an image file from its first bytes.
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut head = [0u8; PNG_SIGNATURE.len()];
    let n = File::open(path)?.read(&mut head)?;
    detect_format_from_bytes(&head[..n])
}

/// Sniff the format of an in-memory image.
///
/// # Errors
///
/// [`IoError::InvalidData`] when fewer than three bytes are available,
/// [`IoError::UnsupportedFormat`] when no signature matches.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < JPEG_SOI.len() {
        return Err(IoError::InvalidData(format!(
            "{} byte(s) is too short to identify an image",
            data.len()
        )));
    }
    if data.starts_with(&PNG_SIGNATURE) {
        Ok(ImageFormat::Png)
    } else if data.starts_with(&JPEG_SOI) {
        Ok(ImageFormat::Jpeg)
    } else {
        Err(IoError::UnsupportedFormat(format!(
            "unrecognized signature {:02X?}",
            &data[..data.len().min(4)]
        )))
    }
}
