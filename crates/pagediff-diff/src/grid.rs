//! Grid differ
//!
//! The page is partitioned into square cells of `cell_size` pixels (the
//! last row and column may be narrower). A pixel differs when the sum of
//! its absolute R, G and B channel differences exceeds the pixel
//! threshold; alpha is ignored. A cell is changed when its count of
//! differing pixels exceeds the cell threshold.
//!
//! The cell-count gate acts as a low-pass filter: a handful of
//! anti-aliasing or compression artifacts inside a cell are ignored while
//! a single edited glyph still trips it.
//!
//! While scanning, the differ can also build a full-resolution
//! [`DiffMask`]: opaque magenta where a pixel differs, fully transparent
//! everywhere else.
//!
//! Cells in one cell-row touch a disjoint band of mask rows, so rows of
//! cells are independent units of work. With the `parallel` feature they
//! are scanned on the rayon thread pool; the result is identical.

use crate::cancel::CancelToken;
use crate::error::{DiffError, DiffResult};
use crate::options::DiffOptions;
use pagediff_core::{Raster, color};

/// Mask pixel for a differing pixel: opaque magenta
pub const MASK_ON: u32 = 0xFF00_FFFF;
/// Mask pixel for an unchanged pixel: fully transparent
pub const MASK_OFF: u32 = 0;

/// Per-cell changed flags, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    rows: u32,
    cols: u32,
    cell_size: u32,
    changed: Vec<bool>,
}

impl CellGrid {
    /// Create a grid of unchanged cells covering a `width` x `height` page.
    pub fn new(width: u32, height: u32, cell_size: u32) -> DiffResult<Self> {
        if width == 0 || height == 0 {
            return Err(DiffError::InvalidInput { width, height });
        }
        if cell_size == 0 {
            return Err(DiffError::InvalidParameters(
                "cell_size must be at least 1".to_string(),
            ));
        }
        let rows = height.div_ceil(cell_size);
        let cols = width.div_ceil(cell_size);
        Ok(Self {
            rows,
            cols,
            cell_size,
            changed: vec![false; rows as usize * cols as usize],
        })
    }

    /// Number of cell rows, `ceil(height / cell_size)`
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of cell columns, `ceil(width / cell_size)`
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Cell edge length in pixels
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Whether cell `(row, col)` is changed. Out-of-range cells are not.
    pub fn is_changed(&self, row: u32, col: u32) -> bool {
        row < self.rows && col < self.cols && self.changed[self.index(row, col)]
    }

    /// Mark cell `(row, col)`. Out-of-range cells are ignored.
    pub fn set_changed(&mut self, row: u32, col: u32, changed: bool) {
        if row < self.rows && col < self.cols {
            let idx = self.index(row, col);
            self.changed[idx] = changed;
        }
    }

    /// Number of changed cells
    pub fn changed_count(&self) -> usize {
        self.changed.iter().filter(|&&c| c).count()
    }

    /// Pixel bounds `[x0, x1) x [y0, y1)` of a cell, clamped to the page.
    ///
    /// Returns `(x0, y0, x1, y1)`.
    pub fn cell_bounds(&self, row: u32, col: u32, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let x0 = col.saturating_mul(self.cell_size).min(width);
        let y0 = row.saturating_mul(self.cell_size).min(height);
        let x1 = x0.saturating_add(self.cell_size).min(width);
        let y1 = y0.saturating_add(self.cell_size).min(height);
        (x0, y0, x1, y1)
    }

    /// Flat index of a cell, `row * cols + col`
    #[inline]
    pub(crate) fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    pub(crate) fn flags(&self) -> &[bool] {
        &self.changed
    }
}

/// Full-resolution binary difference mask.
///
/// Every pixel is either [`MASK_ON`] or [`MASK_OFF`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffMask {
    raster: Raster,
}

impl DiffMask {
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self { raster }
    }

    /// The mask as an RGBA raster
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Whether the pixel at `(x, y)` differs. Out-of-range pixels do not.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.raster.get_pixel(x, y) == Some(MASK_ON)
    }

    /// Number of differing pixels
    pub fn set_count(&self) -> usize {
        self.raster.data().iter().filter(|&&p| p == MASK_ON).count()
    }

    /// Unwrap into the underlying raster
    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

/// Compare two pages cell by cell and build the difference mask.
///
/// # Errors
///
/// - [`DiffError::InvalidParameters`] if `options` do not validate
/// - [`DiffError::DimensionMismatch`] if the pages differ in size
/// - [`DiffError::Cancelled`] if `cancel` fires before the scan finishes
pub fn diff(
    old: &Raster,
    new: &Raster,
    options: &DiffOptions,
    cancel: &CancelToken,
) -> DiffResult<(CellGrid, DiffMask)> {
    let mut grid = prepare(old, new, options)?;
    let mut mask = Raster::new(old.width(), old.height())?.to_mut();
    fill_grid(&mut grid, old, new, options, Some(mask.data_mut()), |_| {
        cancel.check()
    })?;
    Ok((grid, DiffMask::from_raster(mask.into())))
}

/// Compare two pages cell by cell without building a mask.
pub fn diff_cells(
    old: &Raster,
    new: &Raster,
    options: &DiffOptions,
    cancel: &CancelToken,
) -> DiffResult<CellGrid> {
    let mut grid = prepare(old, new, options)?;
    fill_grid(&mut grid, old, new, options, None, |_| cancel.check())?;
    Ok(grid)
}

/// [`diff`] or [`diff_cells`], depending on `with_mask`.
pub(crate) fn scan(
    old: &Raster,
    new: &Raster,
    options: &DiffOptions,
    cancel: &CancelToken,
    with_mask: bool,
) -> DiffResult<(CellGrid, Option<DiffMask>)> {
    if with_mask {
        diff(old, new, options, cancel).map(|(grid, mask)| (grid, Some(mask)))
    } else {
        diff_cells(old, new, options, cancel).map(|grid| (grid, None))
    }
}

fn prepare(old: &Raster, new: &Raster, options: &DiffOptions) -> DiffResult<CellGrid> {
    options.validate()?;
    old.check_same_size(new)?;
    CellGrid::new(old.width(), old.height(), options.cell_size)
}

/// Scan every cell-row into `grid`, and into `mask` when given.
///
/// `gate` runs before each cell-row with the row index; an error from it
/// stops the scan.
fn fill_grid<G>(
    grid: &mut CellGrid,
    old: &Raster,
    new: &Raster,
    options: &DiffOptions,
    mask: Option<&mut [u32]>,
    gate: G,
) -> DiffResult<()>
where
    G: Fn(usize) -> DiffResult<()> + Sync,
{
    let cols = grid.cols as usize;
    let rows = grid.rows as usize;
    let band_len = options.cell_size as usize * old.width() as usize;
    let bands: Vec<Option<&mut [u32]>> = match mask {
        Some(m) => m.chunks_mut(band_len).map(Some).collect(),
        None => (0..rows).map(|_| None).collect(),
    };

    #[cfg(not(feature = "parallel"))]
    grid.changed
        .chunks_mut(cols)
        .zip(bands)
        .enumerate()
        .try_for_each(|(row, (cells, band))| {
            gate(row)?;
            scan_cell_row(old, new, options, row as u32, cells, band);
            Ok::<(), DiffError>(())
        })?;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        grid.changed
            .par_chunks_mut(cols)
            .zip(bands.into_par_iter())
            .enumerate()
            .try_for_each(|(row, (cells, band))| {
                gate(row)?;
                scan_cell_row(old, new, options, row as u32, cells, band);
                Ok::<(), DiffError>(())
            })?;
    }

    Ok(())
}

/// Scan one row of cells.
///
/// `cells` holds the row's changed flags; `band` is the slice of mask
/// pixels covering the same pixel rows, when a mask is being built.
fn scan_cell_row(
    old: &Raster,
    new: &Raster,
    options: &DiffOptions,
    row: u32,
    cells: &mut [bool],
    mut band: Option<&mut [u32]>,
) {
    let width = old.width() as usize;
    let cs = options.cell_size;
    let y0 = row * cs;
    let y1 = y0.saturating_add(cs).min(old.height());

    let mut counts = vec![0u32; cells.len()];
    for y in y0..y1 {
        let off = (y - y0) as usize * width;
        let mut mask_row = band.as_deref_mut().map(|b| &mut b[off..off + width]);
        let old_row = old.row_data(y);
        let new_row = new.row_data(y);

        for (x, (&p_old, &p_new)) in old_row.iter().zip(new_row).enumerate() {
            if color::rgb_distance(p_old, p_new) > options.pixel_threshold {
                counts[x / cs as usize] += 1;
                if let Some(m) = mask_row.as_deref_mut() {
                    m[x] = MASK_ON;
                }
            }
        }
    }

    for (cell, &count) in cells.iter_mut().zip(&counts) {
        *cell = count > options.cell_changed_threshold;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagediff_core::{Color, Rect};

    fn page(w: u32, h: u32) -> Raster {
        Raster::new_filled(w, h, Color::WHITE).unwrap()
    }

    fn with_block(src: &Raster, rect: Rect) -> Raster {
        let mut m = src.to_mut();
        m.fill_rect(rect, Color::BLACK);
        m.into()
    }

    #[test]
    fn test_grid_shape() {
        let grid = CellGrid::new(45, 20, 20).unwrap();
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.cell_bounds(0, 2, 45, 20), (40, 0, 45, 20));
        assert!(CellGrid::new(0, 10, 20).is_err());
    }

    #[test]
    fn test_cell_bounds_saturate() {
        let grid = CellGrid::new(45, 20, u32::MAX).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
        assert_eq!(grid.cell_bounds(0, 0, 45, 20), (0, 0, 45, 20));
        // Out-of-range cells collapse onto the far page edge
        assert_eq!(grid.cell_bounds(7, 9, 45, 20), (45, 20, 45, 20));

        let grid = CellGrid::new(45, 20, 20).unwrap();
        assert_eq!(grid.cell_bounds(u32::MAX, u32::MAX, 45, 20), (45, 20, 45, 20));
    }

    #[test]
    fn test_huge_cell_size_scans_whole_page() {
        let a = page(30, 30);
        let b = with_block(&a, Rect::new(0, 0, 3, 3));
        let opts = DiffOptions::default().with_cell_size(u32::MAX);
        let (grid, mask) = diff(&a, &b, &opts, &CancelToken::new()).unwrap();
        assert_eq!(grid.changed_count(), 1);
        assert_eq!(mask.set_count(), 9);
    }

    #[test]
    fn test_identical_pages() {
        let a = page(64, 48);
        let (grid, mask) = diff(&a, &a.deep_clone(), &DiffOptions::default(), &CancelToken::new())
            .unwrap();
        assert_eq!(grid.changed_count(), 0);
        assert_eq!(mask.set_count(), 0);
        assert!(mask.raster().data().iter().all(|&p| p == MASK_OFF));
    }

    #[test]
    fn test_single_block_marks_cells() {
        let a = page(100, 100);
        let b = with_block(&a, Rect::new(10, 10, 25, 25));
        let (grid, mask) = diff(&a, &b, &DiffOptions::default(), &CancelToken::new()).unwrap();

        assert_eq!(mask.set_count(), 625);
        assert!(mask.is_set(10, 10));
        assert!(mask.is_set(34, 34));
        assert!(!mask.is_set(35, 35));
        // Block spans cells (0..=1, 0..=1)
        assert!(grid.is_changed(0, 0));
        assert!(grid.is_changed(0, 1));
        assert!(grid.is_changed(1, 0));
        assert!(grid.is_changed(1, 1));
        assert_eq!(grid.changed_count(), 4);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let a = page(20, 20);
        // Exactly 5 differing pixels: not enough
        let b = with_block(&a, Rect::new(0, 0, 5, 1));
        let grid = diff_cells(&a, &b, &DiffOptions::default(), &CancelToken::new()).unwrap();
        assert_eq!(grid.changed_count(), 0);

        let b = with_block(&a, Rect::new(0, 0, 6, 1));
        let grid = diff_cells(&a, &b, &DiffOptions::default(), &CancelToken::new()).unwrap();
        assert_eq!(grid.changed_count(), 1);

        // Distance exactly 100 does not count
        let mut m = a.to_mut();
        m.fill_rect(Rect::new(0, 0, 20, 20), Color::new(155, 255, 255));
        let b: Raster = m.into();
        let grid = diff_cells(&a, &b, &DiffOptions::default(), &CancelToken::new()).unwrap();
        assert_eq!(grid.changed_count(), 0);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let a = page(20, 20);
        let mut m = a.to_mut();
        for y in 0..20 {
            for x in 0..20 {
                m.set_rgba(x, y, 255, 255, 255, 0).unwrap();
            }
        }
        let b: Raster = m.into();
        let grid = diff_cells(&a, &b, &DiffOptions::default(), &CancelToken::new()).unwrap();
        assert_eq!(grid.changed_count(), 0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = diff(&page(100, 100), &page(200, 200), &DiffOptions::default(), &CancelToken::new());
        assert!(matches!(result, Err(DiffError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_cancelled_before_scan() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let a = page(40, 40);
        let result = diff(&a, &a, &DiffOptions::default(), &cancel);
        assert!(matches!(result, Err(DiffError::Cancelled)));
    }

    #[test]
    fn test_cancel_stops_between_cell_rows() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        // 10 cell-rows; the token fires while row 2 is being entered
        let a = page(40, 200);
        let b = with_block(&a, Rect::new(0, 0, 40, 200));
        let opts = DiffOptions::default();
        let mut grid = prepare(&a, &b, &opts).unwrap();
        let cancel = CancelToken::new();
        let entered = AtomicUsize::new(0);

        let result = fill_grid(&mut grid, &a, &b, &opts, None, |row| {
            entered.fetch_add(1, Ordering::SeqCst);
            if row == 2 {
                cancel.cancel();
            }
            cancel.check()
        });

        assert!(matches!(result, Err(DiffError::Cancelled)));
        #[cfg(not(feature = "parallel"))]
        {
            assert_eq!(entered.load(Ordering::SeqCst), 3);
            assert!(grid.is_changed(1, 0));
            assert!(!grid.is_changed(2, 0));
            assert!(!grid.is_changed(9, 1));
        }
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let a = page(40, 40);
        let cancel = CancelToken::new();
        let remote = cancel.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(matches!(
            diff_cells(&a, &a, &DiffOptions::default(), &cancel),
            Err(DiffError::Cancelled)
        ));
    }

    #[test]
    fn test_partial_edge_cells() {
        // 30x30 page: the second cell row/column is 10 px wide
        let a = page(30, 30);
        let b = with_block(&a, Rect::new(25, 25, 5, 5));
        let grid = diff_cells(&a, &b, &DiffOptions::default(), &CancelToken::new()).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert!(grid.is_changed(1, 1));
        assert_eq!(grid.changed_count(), 1);
    }
}
