//! Graphics rendering functions
//!
//! This module provides the drawing primitives used to annotate rasters:
//! - Filled rectangles
//! - Rectangle outlines with a stroke width
//! - Bitmap text (see [`RasterMut::render_text`])
//!
//! All drawing is clipped to the image; rectangles partly or entirely
//! outside the raster are not an error.

use super::RasterMut;
use crate::color;

/// RGB color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// White color
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    /// Red color
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    /// Magenta color (the diff-mask marker)
    pub const MAGENTA: Color = Color {
        r: 255,
        g: 0,
        b: 255,
    };

    /// Compose as an opaque 32-bit RGBA pixel
    pub fn to_pixel32(&self) -> u32 {
        color::compose_rgb(self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Axis-aligned rectangle in pixel coordinates.
///
/// Signed so that rectangles may extend past the image edges; drawing
/// clips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Check whether the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Clip to image bounds, returning `(x, y, x_end, y_end)` as `u32`
    /// or `None` if there is no intersection.
    pub fn clip_to(&self, img_w: u32, img_h: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(img_w as i32);
        let y1 = self.bottom().min(img_h as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl RasterMut {
    /// Fill a rectangle with an opaque color.
    pub fn fill_rect(&mut self, rect: Rect, fill: Color) {
        let Some((x, y, x_end, y_end)) = rect.clip_to(self.width(), self.height()) else {
            return;
        };
        let val = fill.to_pixel32();
        for py in y..y_end {
            self.row_data_mut(py)[x as usize..x_end as usize].fill(val);
        }
    }

    /// Render a rectangle outline with the given stroke width.
    ///
    /// The stroke is laid inward from the rectangle edge, so the outline
    /// never extends past `rect`. A stroke at least half the rectangle's
    /// smaller side fills it completely.
    pub fn render_box_color(&mut self, rect: Rect, width: u32, stroke: Color) {
        if rect.is_empty() {
            return;
        }
        let t = (width.max(1) as i32).min(rect.w).min(rect.h);
        // top, bottom, left, right
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), stroke);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.w, t), stroke);
        self.fill_rect(Rect::new(rect.x, rect.y + t, t, rect.h - 2 * t), stroke);
        self.fill_rect(
            Rect::new(rect.right() - t, rect.y + t, t, rect.h - 2 * t),
            stroke,
        );
    }
}
