//! Comparison options
//!
//! All thresholds are configuration, with defaults matching the values the
//! detector has always used: 20px cells, a per-pixel RGB distance above 100,
//! and more than 5 differing pixels per cell.

use crate::error::{DiffError, DiffResult};
use pagediff_core::Color;
use pagediff_io::ImageFormat;
use serde::{Deserialize, Serialize};

/// Default cell edge length in pixels
pub const DEFAULT_CELL_SIZE: u32 = 20;
/// Default per-pixel RGB distance threshold
pub const DEFAULT_PIXEL_THRESHOLD: u32 = 100;
/// Default per-cell differing-pixel threshold
pub const DEFAULT_CELL_CHANGED_THRESHOLD: u32 = 5;

/// Options for the grid differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiffOptions {
    /// Edge length of a grid cell in pixels
    pub cell_size: u32,
    /// A pixel differs when its RGB distance is strictly greater than this
    pub pixel_threshold: u32,
    /// A cell is changed when its differing-pixel count is strictly greater than this
    pub cell_changed_threshold: u32,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            pixel_threshold: DEFAULT_PIXEL_THRESHOLD,
            cell_changed_threshold: DEFAULT_CELL_CHANGED_THRESHOLD,
        }
    }
}

impl DiffOptions {
    /// Set the cell size
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the pixel threshold
    pub fn with_pixel_threshold(mut self, threshold: u32) -> Self {
        self.pixel_threshold = threshold;
        self
    }

    /// Set the cell-changed threshold
    pub fn with_cell_changed_threshold(mut self, threshold: u32) -> Self {
        self.cell_changed_threshold = threshold;
        self
    }

    /// Check the options before use.
    ///
    /// Only a zero cell size is rejected. Thresholds that can never be
    /// exceeded are valid and simply report no changes.
    pub fn validate(&self) -> DiffResult<()> {
        if self.cell_size == 0 {
            return Err(DiffError::InvalidParameters(
                "cell_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Drawing style for annotated pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderStyle {
    /// Box outline width in pixels
    pub stroke_width: u32,
    /// Box outline color
    pub stroke_color: Color,
    /// Fill behind the id label
    pub label_background: Color,
    /// Id label ink
    pub label_text: Color,
    /// Integer scale of the bitmap font
    pub label_scale: u32,
    /// Padding between label text and its background edge
    pub label_padding: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            stroke_width: 3,
            stroke_color: Color::RED,
            label_background: Color::RED,
            label_text: Color::WHITE,
            label_scale: 2,
            label_padding: 2,
        }
    }
}

impl RenderStyle {
    /// Set the outline width
    pub fn with_stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Set the outline and label background color
    pub fn with_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self.label_background = color;
        self
    }

    /// Set the label font scale
    pub fn with_label_scale(mut self, scale: u32) -> Self {
        self.label_scale = scale;
        self
    }
}

/// Encoding used for the annotated page images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum AnnotationFormat {
    /// Lossy JPEG at the given quality (1-100)
    Jpeg { quality: u8 },
    /// Lossless PNG
    Png,
}

impl Default for AnnotationFormat {
    fn default() -> Self {
        AnnotationFormat::Jpeg {
            quality: pagediff_io::DEFAULT_JPEG_QUALITY,
        }
    }
}

impl AnnotationFormat {
    /// The underlying image format
    pub fn image_format(&self) -> ImageFormat {
        match self {
            AnnotationFormat::Jpeg { .. } => ImageFormat::Jpeg,
            AnnotationFormat::Png => ImageFormat::Png,
        }
    }
}

/// Options for a full comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompareOptions {
    /// Grid differ thresholds
    pub diff: DiffOptions,
    /// Annotation drawing style
    pub style: RenderStyle,
    /// Produce the diff mask image
    pub with_mask: bool,
    /// Produce the two annotated page images
    pub with_annotations: bool,
    /// Encoding of the annotated page images
    pub annotation_format: AnnotationFormat,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            diff: DiffOptions::default(),
            style: RenderStyle::default(),
            with_mask: true,
            with_annotations: true,
            annotation_format: AnnotationFormat::default(),
        }
    }
}

impl CompareOptions {
    /// Options that only compute regions
    pub fn regions_only() -> Self {
        Self::default().with_mask(false).with_annotations(false)
    }

    /// Set the differ options
    pub fn with_diff(mut self, diff: DiffOptions) -> Self {
        self.diff = diff;
        self
    }

    /// Set the drawing style
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable the mask output
    pub fn with_mask(mut self, enabled: bool) -> Self {
        self.with_mask = enabled;
        self
    }

    /// Enable or disable the annotated outputs
    pub fn with_annotations(mut self, enabled: bool) -> Self {
        self.with_annotations = enabled;
        self
    }

    /// Set the annotated output encoding
    pub fn with_annotation_format(mut self, format: AnnotationFormat) -> Self {
        self.annotation_format = format;
        self
    }

    /// Check the options before use
    pub fn validate(&self) -> DiffResult<()> {
        self.diff.validate()?;
        if let AnnotationFormat::Jpeg { quality } = self.annotation_format
            && !(1..=100).contains(&quality)
        {
            return Err(DiffError::InvalidParameters(format!(
                "JPEG quality must be in 1..=100, got {}",
                quality
            )));
        }
        Ok(())
    }
}
