//! pagediff-core - Basic data structures for visual difference detection
//!
//! This crate provides the fundamental data structures used throughout
//! the pagediff workspace:
//!
//! - [`Raster`] / [`RasterMut`] - The RGBA image container (immutable / mutable)
//! - [`Rect`] / [`Color`] - Pixel-space rectangles and drawing colors
//! - [`Region`] / [`BoundingBox`] - Detected change regions in normalized
//!   percentage coordinates
//!
//! # Example
//!
//! ```
//! use pagediff_core::{Color, Raster};
//!
//! let raster = Raster::new_filled(64, 48, Color::WHITE).unwrap();
//! assert_eq!(raster.width(), 64);
//! assert_eq!(raster.get_rgb(10, 10), Some((255, 255, 255)));
//! ```

pub mod error;
pub mod raster;
pub mod region;

pub use error::{Error, Result};
pub use raster::{Color, Raster, RasterMut, Rect};
pub use region::{BoundingBox, Region};

/// Packed-pixel helpers.
///
/// A pixel is one `u32` laid out as `0xRRGGBBAA`: red in the most
/// significant byte, alpha in the least.
pub mod color {
    /// Pack four channels into a pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        u32::from_be_bytes([r, g, b, a])
    }

    /// Pack an opaque pixel.
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        u32::from_be_bytes([r, g, b, 0xFF])
    }

    /// Unpack all four channels.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = pixel.to_be_bytes();
        (r, g, b, a)
    }

    /// Unpack the color channels, dropping alpha.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        let [r, g, b, _] = pixel.to_be_bytes();
        (r, g, b)
    }

    /// Alpha channel of a pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        pixel as u8
    }

    /// Sum of absolute per-channel differences over R, G and B.
    ///
    /// Alpha is ignored. The result lies in `0..=765`.
    #[inline]
    pub fn rgb_distance(p1: u32, p2: u32) -> u32 {
        let [r1, g1, b1, _] = p1.to_be_bytes();
        let [r2, g2, b2, _] = p2.to_be_bytes();
        r1.abs_diff(r2) as u32 + g1.abs_diff(g2) as u32 + b1.abs_diff(b2) as u32
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_compose_extract() {
            let p = compose_rgba(0x12, 0x34, 0x56, 0x78);
            assert_eq!(p, 0x1234_5678);
            assert_eq!(extract_rgba(p), (0x12, 0x34, 0x56, 0x78));
            assert_eq!(alpha(compose_rgb(1, 2, 3)), 255);
        }

        #[test]
        fn test_rgb_distance_ignores_alpha() {
            let a = compose_rgba(10, 20, 30, 0);
            let b = compose_rgba(10, 20, 30, 255);
            assert_eq!(rgb_distance(a, b), 0);
        }

        #[test]
        fn test_rgb_distance_extremes() {
            assert_eq!(rgb_distance(compose_rgb(0, 0, 0), compose_rgb(255, 255, 255)), 765);
            assert_eq!(rgb_distance(compose_rgb(100, 0, 0), compose_rgb(0, 0, 1)), 101);
        }
    }
}
