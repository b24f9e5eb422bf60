//! Change regions in normalized coordinates
//!
//! A [`Region`] is one connected cluster of changed cells, reported as a
//! [`BoundingBox`] whose coordinates are percentages of the image height
//! (y) and width (x). The percentage form is resolution-independent: any
//! consumer can scale it to whatever size it displays the page at.
//!
//! On the wire a bounding box is the array `[yMin, xMin, yMax, xMax]`.

use crate::raster::Rect;
use serde::{Deserialize, Serialize};

/// Normalized bounding box, all coordinates in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub y_min: f64,
    pub x_min: f64,
    pub y_max: f64,
    pub x_max: f64,
}

impl BoundingBox {
    /// Create a bounding box from `[yMin, xMin, yMax, xMax]` percentages.
    pub const fn new(y_min: f64, x_min: f64, y_max: f64, x_max: f64) -> Self {
        Self {
            y_min,
            x_min,
            y_max,
            x_max,
        }
    }

    /// Convert inclusive cell-grid bounds to percentages of the image.
    ///
    /// Cells on the last row or column may extend past the image edge, so
    /// the far edges are clamped to 100.
    pub fn from_cell_bounds(
        min_row: u32,
        max_row: u32,
        min_col: u32,
        max_col: u32,
        cell_size: u32,
        width: u32,
        height: u32,
    ) -> Self {
        let cs = cell_size as f64;
        let w = width as f64;
        let h = height as f64;
        Self {
            y_min: (min_row as f64 * cs / h * 100.0).max(0.0),
            x_min: (min_col as f64 * cs / w * 100.0).max(0.0),
            y_max: ((max_row + 1) as f64 * cs / h * 100.0).min(100.0),
            x_max: ((max_col + 1) as f64 * cs / w * 100.0).min(100.0),
        }
    }

    /// Map back to a pixel rectangle for an image of the given size.
    ///
    /// Edges round to the nearest pixel; boxes produced by the clusterer lie
    /// on cell boundaries, so this recovers the exact cell edges.
    pub fn to_pixel_rect(&self, width: u32, height: u32) -> Rect {
        let w = width as f64;
        let h = height as f64;
        let x0 = (self.x_min / 100.0 * w).round() as i32;
        let y0 = (self.y_min / 100.0 * h).round() as i32;
        let x1 = (self.x_max / 100.0 * w).round() as i32;
        let y1 = (self.y_max / 100.0 * h).round() as i32;
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Check `0 <= min <= max <= 100` on both axes.
    pub fn is_well_formed(&self) -> bool {
        let axis_ok = |lo: f64, hi: f64| (0.0..=100.0).contains(&lo) && lo <= hi && hi <= 100.0;
        axis_ok(self.y_min, self.y_max) && axis_ok(self.x_min, self.x_max)
    }

    /// Fraction of the page covered, in percent of the total area.
    pub fn area_percent(&self) -> f64 {
        (self.y_max - self.y_min) * (self.x_max - self.x_min) / 100.0
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.y_min, b.x_min, b.y_max, b.x_max]
    }
}

/// A detected change region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Sequential id in discovery order, starting at `"1"`
    pub id: String,
    /// Normalized bounds
    pub bounding_box: BoundingBox,
}

impl Region {
    /// Create a new region
    pub fn new(id: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            id: id.into(),
            bounding_box,
        }
    }
}
