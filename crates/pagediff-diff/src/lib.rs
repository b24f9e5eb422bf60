//! pagediff-diff - Visual difference detection between two page images
//!
//! This crate turns two equally-sized rasters into a list of change
//! regions plus optional debug images:
//!
//! - **Grid differ** - per-cell changed flags and a binary diff mask
//! - **Region clusterer** - 8-connected clusters of changed cells as
//!   normalized bounding boxes
//! - **Debug renderer** - boxes and id labels drawn through a [`Canvas`]
//! - **Orchestrator** - [`compare`], the single entry point tying it together
//!
//! # Example
//!
//! ```
//! use pagediff_core::{Color, Raster, Rect};
//! use pagediff_diff::{CompareOptions, compare};
//!
//! let old = Raster::new_filled(100, 100, Color::WHITE).unwrap();
//! let mut edit = old.to_mut();
//! edit.fill_rect(Rect::new(10, 10, 25, 25), Color::BLACK);
//! let new: Raster = edit.into();
//!
//! let result = compare(&old, &new, &CompareOptions::default()).unwrap();
//! assert_eq!(result.regions.len(), 1);
//! assert_eq!(result.regions[0].id, "1");
//! ```

pub mod cancel;
pub mod cluster;
pub mod compare;
pub mod error;
pub mod grid;
pub mod options;
pub mod render;

// Re-export core types
pub use pagediff_core;

pub use cancel::CancelToken;
pub use cluster::{CellCluster, cluster, cluster_cells};
pub use compare::{Comparison, compare, compare_encoded, compare_with_cancel};
pub use error::{DiffError, DiffResult};
pub use grid::{CellGrid, DiffMask, MASK_OFF, MASK_ON, diff, diff_cells};
pub use options::{AnnotationFormat, CompareOptions, DiffOptions, RenderStyle};
pub use render::{Canvas, annotate, draw_regions, encode_annotated, encode_mask};
