//! Region clustering regression test
//!
//! Separated edits become separate regions, diagonal neighbours merge,
//! and raising either threshold never adds regions, up to thresholds
//! that can never be exceeded.
//!
//! Run with:
//! ```
//! cargo test -p pagediff-diff --test cluster_reg
//! ```

use pagediff_core::{Color, Rect};
use pagediff_diff::{
    CancelToken, CompareOptions, DiffOptions, cluster, cluster_cells, compare, diff_cells,
};
use pagediff_test::RegParams;
use pagediff_test::synth::{blank_page, with_block};

#[test]
fn cluster_reg() {
    let mut rp = RegParams::new("cluster");
    let never = CancelToken::new();

    // --- Two single-cell edits with a clear cell between them ---
    let page = blank_page(200, 100);
    let mut edited = with_block(&page, Rect::new(122, 3, 10, 10), Color::BLACK);
    edited = with_block(&edited, Rect::new(45, 62, 10, 10), Color::BLACK);
    let result = compare(&page, &edited, &CompareOptions::regions_only()).unwrap();
    rp.compare_values(2.0, result.regions.len() as f64, 0.0);
    rp.compare_strings(b"1", result.regions[0].id.as_bytes());
    rp.compare_strings(b"2", result.regions[1].id.as_bytes());
    // Discovery is row-major: the upper edit is found first even though it
    // lies further right
    let first = result.regions[0].bounding_box;
    let second = result.regions[1].bounding_box;
    rp.compare_values(60.0, first.x_min, 1e-9);
    rp.compare_values(0.0, first.y_min, 1e-9);
    rp.compare_values(20.0, second.x_min, 1e-9);
    rp.compare_values(60.0, second.y_min, 1e-9);

    // --- Diagonal neighbour cells merge into one region ---
    let mut diagonal = with_block(&page, Rect::new(12, 12, 8, 8), Color::BLACK);
    diagonal = with_block(&diagonal, Rect::new(20, 20, 8, 8), Color::BLACK);
    let grid = diff_cells(&page, &diagonal, &DiffOptions::default(), &never).unwrap();
    let clusters = cluster_cells(&grid);
    rp.compare_values(1.0, clusters.len() as f64, 0.0);
    rp.compare_values(2.0, clusters[0].cell_count as f64, 0.0);
    let regions = cluster(&grid, 200, 100);
    rp.compare_values(20.0, regions[0].bounding_box.x_max, 1e-9);
    rp.compare_values(40.0, regions[0].bounding_box.y_max, 1e-9);

    // --- Monotonic suppression ---
    // Isolated edits of 4, 9, 16, 25 and 36 pixels, each in its own cell
    let mut graded = page.clone();
    for (i, side) in [2, 3, 4, 5, 6].into_iter().enumerate() {
        let x = 5 + 40 * i as i32;
        graded = with_block(&graded, Rect::new(x, 45, side, side), Color::BLACK);
    }
    let mut previous = usize::MAX;
    // Runs past the 20x20 cell area: unreachable thresholds are accepted
    for threshold in 0..=500 {
        let opts = CompareOptions::regions_only()
            .with_diff(DiffOptions::default().with_cell_changed_threshold(threshold));
        let n = compare(&page, &graded, &opts).unwrap().regions.len();
        let expected = [4u32, 9, 16, 25, 36]
            .iter()
            .filter(|&&count| count > threshold)
            .count();
        rp.compare_values(expected as f64, n as f64, 0.0);
        if n > previous {
            rp.compare_values(previous as f64, n as f64, 0.0);
        }
        previous = n;
    }
    for threshold in [399, 400, 1000, u32::MAX] {
        let opts = CompareOptions::regions_only()
            .with_diff(DiffOptions::default().with_cell_changed_threshold(threshold));
        let result = compare(&page, &black_page(&page), &opts);
        rp.compare_values(1.0, result.is_ok() as u8 as f64, 0.0);
        rp.compare_values(0.0, result.map_or(1, |r| r.regions.len()) as f64, 0.0);
    }
    // White to black is distance 765, the largest possible
    for (threshold, expected) in [(764, 1.0), (765, 0.0), (u32::MAX, 0.0)] {
        let opts = CompareOptions::regions_only()
            .with_diff(DiffOptions::default().with_pixel_threshold(threshold));
        let result = compare(&page, &black_page(&page), &opts);
        rp.compare_values(1.0, result.is_ok() as u8 as f64, 0.0);
        rp.compare_values(expected, result.map_or(usize::MAX, |r| r.regions.len()) as f64, 0.0);
    }

    // --- Whole-page change is one region covering everything ---
    let black = black_page(&page);
    let full = compare(&page, &black, &CompareOptions::regions_only()).unwrap();
    rp.compare_values(1.0, full.regions.len() as f64, 0.0);
    let b = full.regions[0].bounding_box;
    rp.compare_values(0.0, b.y_min + b.x_min, 1e-9);
    rp.compare_values(200.0, b.y_max + b.x_max, 1e-9);

    assert!(rp.cleanup(), "cluster regression test failed");
}

fn black_page(page: &pagediff_core::Raster) -> pagediff_core::Raster {
    with_block(page, Rect::new(0, 0, page.width() as i32, page.height() as i32), Color::BLACK)
}
