//! Orchestrator
//!
//! One call runs the whole pipeline: validate, scan the grid, cluster
//! regions, annotate both pages and encode the mask. Any failure aborts
//! the call; there is no partial result. Which images are produced is
//! controlled by [`CompareOptions`].

use crate::cancel::CancelToken;
use crate::cluster::cluster;
use crate::error::{DiffError, DiffResult};
use crate::grid::scan;
use crate::options::CompareOptions;
use crate::render::{annotate, encode_annotated, encode_mask};
use pagediff_core::{Raster, Region};
use tracing::debug;

/// Result of comparing two pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Change regions in discovery order
    pub regions: Vec<Region>,
    /// Old page with boxes drawn, when annotations are enabled
    pub annotated_old: Option<Vec<u8>>,
    /// New page with boxes drawn, when annotations are enabled
    pub annotated_new: Option<Vec<u8>>,
    /// PNG-encoded difference mask, when the mask is enabled
    pub mask_image: Option<Vec<u8>>,
    /// Number of changed grid cells
    pub changed_cells: usize,
}

impl Comparison {
    /// Whether any change was detected
    pub fn has_changes(&self) -> bool {
        !self.regions.is_empty()
    }
}

/// Compare two decoded pages.
///
/// # Errors
///
/// - [`DiffError::DimensionMismatch`] if the pages differ in size
/// - [`DiffError::InvalidParameters`] if `options` do not validate
/// - [`DiffError::EncodeFailure`] if an output image cannot be encoded
pub fn compare(old: &Raster, new: &Raster, options: &CompareOptions) -> DiffResult<Comparison> {
    compare_with_cancel(old, new, options, &CancelToken::default())
}

/// Compare two decoded pages, aborting with [`DiffError::Cancelled`] once
/// `cancel` fires.
pub fn compare_with_cancel(
    old: &Raster,
    new: &Raster,
    options: &CompareOptions,
    cancel: &CancelToken,
) -> DiffResult<Comparison> {
    let span = tracing::debug_span!("compare", width = old.width(), height = old.height());
    let _enter = span.enter();

    options.validate()?;
    old.check_same_size(new)?;
    let (width, height) = (old.width(), old.height());

    let (grid, mask) = scan(old, new, &options.diff, cancel, options.with_mask)
        .inspect_err(|e| debug!(error = %e, "grid scan aborted"))?;
    let changed_cells = grid.changed_count();
    debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        changed_cells,
        "grid scanned"
    );

    let regions = cluster(&grid, width, height);
    debug!(regions = regions.len(), "regions clustered");

    let (annotated_old, annotated_new) = if options.with_annotations {
        cancel.check()?;
        let old_bytes = encode_annotated(
            &annotate(old, &regions, &options.style),
            options.annotation_format,
        )?;
        cancel.check()?;
        let new_bytes = encode_annotated(
            &annotate(new, &regions, &options.style),
            options.annotation_format,
        )?;
        debug!(
            old_bytes = old_bytes.len(),
            new_bytes = new_bytes.len(),
            "pages annotated"
        );
        (Some(old_bytes), Some(new_bytes))
    } else {
        (None, None)
    };

    let mask_image = match mask {
        Some(mask) => {
            cancel.check()?;
            let bytes = encode_mask(&mask)?;
            debug!(bytes = bytes.len(), set = mask.set_count(), "mask encoded");
            Some(bytes)
        }
        None => None,
    };

    Ok(Comparison {
        regions,
        annotated_old,
        annotated_new,
        mask_image,
        changed_cells,
    })
}

/// Decode two encoded pages (PNG or JPEG) and compare them.
///
/// # Errors
///
/// [`DiffError::DecodeFailure`] if either buffer cannot be decoded, plus
/// everything [`compare`] can return.
pub fn compare_encoded(
    old: &[u8],
    new: &[u8],
    options: &CompareOptions,
) -> DiffResult<Comparison> {
    let (old, new) = decode_pair(old, new);
    let old = old.map_err(DiffError::DecodeFailure)?;
    let new = new.map_err(DiffError::DecodeFailure)?;
    compare(&old, &new, options)
}

type Decoded = pagediff_io::IoResult<Raster>;

#[cfg(not(feature = "parallel"))]
fn decode_pair(old: &[u8], new: &[u8]) -> (Decoded, Decoded) {
    (
        pagediff_io::read_image_mem(old),
        pagediff_io::read_image_mem(new),
    )
}

#[cfg(feature = "parallel")]
fn decode_pair(old: &[u8], new: &[u8]) -> (Decoded, Decoded) {
    rayon::join(
        || pagediff_io::read_image_mem(old),
        || pagediff_io::read_image_mem(new),
    )
}
