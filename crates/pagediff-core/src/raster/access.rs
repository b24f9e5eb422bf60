//! Pixel access
//!
//! Bounds-checked getters return `None` outside the image; setters return
//! [`Error::OutOfBounds`]. The `*_unchecked` forms skip the check and
//! panic on out-of-range coordinates.

use super::{Raster, RasterMut};
use crate::color;
use crate::error::{Error, Result};

#[inline]
fn index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

impl Raster {
    /// Get the packed pixel at `(x, y)`.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width() && y < self.height() {
            Some(self.get_pixel_unchecked(x, y))
        } else {
            None
        }
    }

    /// Get the packed pixel at `(x, y)` without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.data()[index(self.width(), x, y)]
    }

    /// Get the RGB components at `(x, y)`.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Get the RGBA components at `(x, y)`.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgba)
    }
}

impl RasterMut {
    /// Get the packed pixel at `(x, y)`.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width() && y < self.height() {
            Some(self.get_pixel_unchecked(x, y))
        } else {
            None
        }
    }

    /// Get the packed pixel at `(x, y)` without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.data()[index(self.width(), x, y)]
    }

    /// Set the packed pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set the packed pixel at `(x, y)` without bounds checking.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let idx = index(self.width(), x, y);
        self.data_mut()[idx] = val;
    }

    /// Set an opaque RGB value at `(x, y)`.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }

    /// Set an RGBA value at `(x, y)`.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_out_of_bounds() {
        let raster = Raster::new(5, 5).unwrap();
        assert_eq!(raster.get_pixel(5, 0), None);
        assert_eq!(raster.get_pixel(0, 5), None);
        assert_eq!(raster.get_pixel(4, 4), Some(0));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut rm = Raster::new(5, 5).unwrap().to_mut();
        assert!(matches!(
            rm.set_rgb(5, 1, 0, 0, 0),
            Err(Error::OutOfBounds { x: 5, y: 1, .. })
        ));
    }

    #[test]
    fn test_set_and_get_rgba() {
        let mut rm = Raster::new(5, 5).unwrap().to_mut();
        rm.set_rgba(2, 3, 255, 0, 255, 255).unwrap();
        assert_eq!(rm.get_pixel(2, 3), Some(0xff00_ffff));
        let raster: Raster = rm.into();
        assert_eq!(raster.get_rgba(2, 3), Some((255, 0, 255, 255)));
        assert_eq!(raster.get_rgb(2, 3), Some((255, 0, 255)));
    }
}
