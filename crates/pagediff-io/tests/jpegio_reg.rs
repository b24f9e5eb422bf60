//! JPEG I/O regression test
//!
//! Lossy write at several qualities; decoded pages stay close to the
//! source and smaller qualities give smaller files.
//!
//! Run with:
//! ```
//! cargo test -p pagediff-io --test jpegio_reg
//! ```

use pagediff_core::{Color, Raster, Rect, color};
use pagediff_io::{
    DEFAULT_JPEG_QUALITY, ImageFormat, detect_format_from_bytes, read_image_mem, write_image_mem,
    write_jpeg,
};
use pagediff_test::RegParams;
use pagediff_test::synth::text_page;

/// Mean per-pixel RGB distance between two same-sized rasters
fn mean_distance(a: &Raster, b: &Raster) -> f64 {
    let total: u64 = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&p1, &p2)| color::rgb_distance(p1, p2) as u64)
        .sum();
    total as f64 / a.data().len() as f64
}

fn encode(raster: &Raster, quality: u8) -> Vec<u8> {
    let mut buffer = Vec::new();
    write_jpeg(raster, &mut buffer, quality).unwrap();
    buffer
}

#[test]
fn jpegio_reg() {
    let mut rp = RegParams::new("jpegio");

    let mut pm = text_page(200, 150, 14).to_mut();
    pm.fill_rect(Rect::new(120, 40, 50, 50), Color::new(200, 30, 30));
    let page: Raster = pm.into();

    // Test 1: default-quality write via the generic entry point
    let bytes = write_image_mem(&page, ImageFormat::Jpeg).unwrap();
    rp.compare_values(
        1.0,
        (detect_format_from_bytes(&bytes).unwrap() == ImageFormat::Jpeg) as u8 as f64,
        0.0,
    );
    rp.compare_strings(&encode(&page, DEFAULT_JPEG_QUALITY), &bytes);
    let decoded = read_image_mem(&bytes).unwrap();
    rp.compare_values(200.0, decoded.width() as f64, 0.0);
    rp.compare_values(150.0, decoded.height() as f64, 0.0);

    // Test 2: decoded pixels stay near the source
    let err = mean_distance(&page, &decoded);
    eprintln!("  q={}: mean distance {:.2}", DEFAULT_JPEG_QUALITY, err);
    rp.compare_values(0.0, err, 12.0);
    // Interior of the solid block is well below the pixel threshold
    let (r, g, b) = decoded.get_rgb(145, 65).unwrap();
    let d = r.abs_diff(200) as u32 + g.abs_diff(30) as u32 + b.abs_diff(30) as u32;
    rp.compare_values(0.0, d as f64, 30.0);

    // Test 3: file size grows with quality
    let small = encode(&page, 20).len();
    let large = encode(&page, 95).len();
    eprintln!("  q=20: {} bytes, q=95: {} bytes", small, large);
    rp.compare_values(1.0, (small < large) as u8 as f64, 0.0);

    // Test 4: decoded JPEGs are fully opaque
    let opaque = decoded.data().iter().all(|&p| p & 0xFF == 0xFF);
    rp.compare_values(1.0, opaque as u8 as f64, 0.0);

    rp.write_data(&bytes, "page", "jpg").unwrap();

    assert!(rp.cleanup(), "jpegio regression test failed");
}
