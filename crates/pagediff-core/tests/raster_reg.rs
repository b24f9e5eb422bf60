//! Raster regression test
//!
//! Ownership model, byte conversion, drawing primitives and label text.
//!
//! Run with:
//! ```
//! cargo test -p pagediff-core --test raster_reg
//! ```

use pagediff_core::raster::{GLYPH_HEIGHT, text_extent};
use pagediff_core::{BoundingBox, Color, Error, Raster, Rect, Region};
use pagediff_test::RegParams;

#[test]
fn raster_reg() {
    let mut rp = RegParams::new("raster");

    // --- Zero-size rasters are rejected ---
    let zero = Raster::new(0, 10);
    rp.compare_values(
        1.0,
        matches!(zero, Err(Error::InvalidDimension { width: 0, height: 10 })) as u8 as f64,
        0.0,
    );

    // --- RGBA bytes round trip ---
    let mut bytes = Vec::new();
    for i in 0..(6 * 4) as u32 {
        bytes.extend_from_slice(&[i as u8, (i * 3) as u8, (i * 7) as u8, if i % 2 == 0 { 0 } else { 255 }]);
    }
    let raster = Raster::from_rgba_bytes(6, 4, &bytes).unwrap();
    rp.compare_strings(&bytes, &raster.to_rgba_bytes());
    rp.compare_values(
        1.0,
        (raster.get_rgba(1, 0) == Some((1, 3, 7, 255))) as u8 as f64,
        0.0,
    );
    let short = Raster::from_rgba_bytes(6, 4, &bytes[..10]);
    rp.compare_values(1.0, short.is_err() as u8 as f64, 0.0);

    // --- Shared rasters copy on write ---
    let shared = raster.clone();
    let mut edit = shared.to_mut();
    edit.set_rgb(0, 0, 9, 9, 9).unwrap();
    let edited: Raster = edit.into();
    rp.compare_values(
        1.0,
        (raster.get_rgb(0, 0) == Some((0, 0, 0))) as u8 as f64,
        0.0,
    );
    rp.compare_values(
        1.0,
        (edited.get_rgb(0, 0) == Some((9, 9, 9))) as u8 as f64,
        0.0,
    );
    // A clone keeps the buffer shared, so it cannot be taken exclusively
    rp.compare_values(1.0, shared.try_into_mut().is_err() as u8 as f64, 0.0);
    let unique = raster.deep_clone();
    rp.compare_values(1.0, unique.try_into_mut().is_ok() as u8 as f64, 0.0);

    // --- Size checks ---
    let a = Raster::new(10, 20).unwrap();
    let b = Raster::new(20, 10).unwrap();
    let mismatch = a.check_same_size(&b);
    rp.compare_values(
        1.0,
        matches!(
            mismatch,
            Err(Error::DimensionMismatch {
                expected: (10, 20),
                actual: (20, 10)
            })
        ) as u8 as f64,
        0.0,
    );

    // --- Box outline and label text on a page ---
    let page = Raster::new_filled(100, 60, Color::WHITE).unwrap();
    let mut pm = page.to_mut();
    let region = Region::new("12", BoundingBox::new(50.0, 10.0, 100.0, 50.0));
    let rect = region.bounding_box.to_pixel_rect(100, 60);
    rp.compare_values(10.0, rect.x as f64, 0.0);
    rp.compare_values(30.0, rect.y as f64, 0.0);
    rp.compare_values(40.0, rect.w as f64, 0.0);
    rp.compare_values(30.0, rect.h as f64, 0.0);
    pm.render_box_color(rect, 2, Color::RED);
    let (tw, th) = text_extent(&region.id, 1);
    rp.compare_values(11.0, tw as f64, 0.0);
    rp.compare_values(GLYPH_HEIGHT as f64, th as f64, 0.0);
    pm.fill_rect(Rect::new(10, 30 - th as i32 - 2, tw as i32 + 2, th as i32 + 2), Color::RED);
    pm.render_text(11, 30 - th as i32 - 1, &region.id, 1, Color::WHITE);
    let drawn: Raster = pm.into();

    rp.compare_values(
        1.0,
        (drawn.get_rgb(10, 45) == Some((255, 0, 0))) as u8 as f64,
        0.0,
    );
    rp.compare_values(
        1.0,
        (drawn.get_rgb(49, 59) == Some((255, 0, 0))) as u8 as f64,
        0.0,
    );
    rp.compare_values(
        1.0,
        (drawn.get_rgb(30, 45) == Some((255, 255, 255))) as u8 as f64,
        0.0,
    );
    let ink = (11..22)
        .flat_map(|x| (21..28).map(move |y| (x, y)))
        .filter(|&(x, y)| drawn.get_rgb(x, y) == Some((255, 255, 255)))
        .count();
    eprintln!("label ink pixels: {}", ink);
    rp.compare_values(1.0, (ink > 0) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "raster regression test failed");
}
