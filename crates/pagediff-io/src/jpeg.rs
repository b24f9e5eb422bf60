//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Decoded images are opaque RGBA; writing drops alpha.

use crate::{IoError, IoResult};
use jpeg_decoder::PixelFormat;
use pagediff_core::{Raster, color};
use std::io::{Read, Write};

/// Default quality for annotated page images.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Read a JPEG image from a reader.
///
/// Grayscale (8 and 16 bit), RGB and CMYK sources are accepted.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let npix = width as usize * height as usize;
    let stride = match info.pixel_format {
        PixelFormat::L8 => 1,
        PixelFormat::L16 => 2,
        PixelFormat::RGB24 => 3,
        PixelFormat::CMYK32 => 4,
    };
    if pixels.len() < npix * stride {
        return Err(IoError::InvalidData(format!(
            "JPEG pixel data truncated: {} bytes for {}x{}",
            pixels.len(),
            width,
            height
        )));
    }

    let mut raster = Raster::new(width, height)?.to_mut();
    for (out, p) in raster.data_mut().iter_mut().zip(pixels.chunks_exact(stride)) {
        *out = match info.pixel_format {
            // 16-bit luminance is big-endian; keep the high byte
            PixelFormat::L8 | PixelFormat::L16 => color::compose_rgb(p[0], p[0], p[0]),
            PixelFormat::RGB24 => color::compose_rgb(p[0], p[1], p[2]),
            PixelFormat::CMYK32 => {
                let k = p[3] as u32;
                let ch = |c: u8| ((255 - c as u32) * (255 - k) / 255) as u8;
                color::compose_rgb(ch(p[0]), ch(p[1]), ch(p[2]))
            }
        };
    }

    Ok(raster.into())
}

/// Write a raster as a baseline JPEG.
///
/// # Arguments
/// * `quality` - Encoder quality, 1 (smallest) to 100 (best)
///
/// # Errors
/// Returns [`IoError::EncodeError`] if the quality is out of range or the
/// image is larger than 65535 pixels on either side.
pub fn write_jpeg<W: Write>(raster: &Raster, writer: W, quality: u8) -> IoResult<()> {
    if !(1..=100).contains(&quality) {
        return Err(IoError::EncodeError(format!(
            "JPEG quality must be in 1..=100, got {}",
            quality
        )));
    }
    let (Ok(width), Ok(height)) = (u16::try_from(raster.width()), u16::try_from(raster.height()))
    else {
        return Err(IoError::EncodeError(format!(
            "image too large for JPEG: {}x{}",
            raster.width(),
            raster.height()
        )));
    };

    let mut rgb = Vec::with_capacity(raster.data().len() * 3);
    for &pixel in raster.data() {
        let (r, g, b) = color::extract_rgb(pixel);
        rgb.extend_from_slice(&[r, g, b]);
    }

    let encoder = jpeg_encoder::Encoder::new(writer, quality);
    encoder
        .encode(&rgb, width, height, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    Ok(())
}
