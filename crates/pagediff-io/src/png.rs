//! PNG image format support
//!
//! Every decoded PNG becomes an RGBA raster: palette and low-bit-depth
//! images are expanded, transparency chunks become alpha, and 16-bit
//! samples keep their high byte. Writing always produces 8-bit RGBA so
//! the alpha channel survives a round trip unchanged.

use crate::{IoError, IoResult};
use pagediff_core::{Raster, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let channels = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unexpected PNG output color type: {:?}",
                other
            )));
        }
    };
    let bytes_per_sample = match output_info.bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unexpected PNG output bit depth: {:?}",
                other
            )));
        }
    };

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let stride = channels * bytes_per_sample;

    let mut raster = Raster::new(width, height)?.to_mut();
    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        let row = raster.row_data_mut(y);
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * stride;
            // Big-endian 16-bit samples: the high byte comes first.
            let sample = |c: usize| data[idx + c * bytes_per_sample];
            *out = match channels {
                1 => {
                    let g = sample(0);
                    color::compose_rgb(g, g, g)
                }
                2 => {
                    let g = sample(0);
                    color::compose_rgba(g, g, g, sample(1))
                }
                3 => color::compose_rgb(sample(0), sample(1), sample(2)),
                _ => color::compose_rgba(sample(0), sample(1), sample(2), sample(3)),
            };
        }
    }

    Ok(raster.into())
}

/// Write a PNG image as 8-bit RGBA
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(&raster.to_rgba_bytes())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
