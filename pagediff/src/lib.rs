//! pagediff - Visual difference detection for document pages
//!
//! Given two renderings of the same page, before and after a revision,
//! pagediff finds the regions that changed, reports each as a normalized
//! bounding box, and produces a binary diff mask plus boxed and labelled
//! copies of both pages.
//!
//! # Example
//!
//! ```
//! use pagediff::{Color, CompareOptions, Raster, Rect, compare};
//!
//! let old = Raster::new_filled(200, 100, Color::WHITE).unwrap();
//! let mut edit = old.to_mut();
//! edit.fill_rect(Rect::new(150, 70, 10, 10), Color::BLACK);
//! let new: Raster = edit.into();
//!
//! let result = compare(&old, &new, &CompareOptions::default()).unwrap();
//! let b = result.regions[0].bounding_box;
//! assert_eq!([b.y_min, b.x_min, b.y_max, b.x_max], [60.0, 70.0, 80.0, 80.0]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pagediff_core::*;

// Re-export the comparison engine at the top level
pub use pagediff_diff::{
    AnnotationFormat, CancelToken, Canvas, Comparison, CompareOptions, DiffError, DiffOptions,
    DiffResult, RenderStyle, compare, compare_encoded, compare_with_cancel,
};

// Re-export crates as modules to avoid name conflicts
pub use pagediff_diff as diff;
pub use pagediff_io as io;
