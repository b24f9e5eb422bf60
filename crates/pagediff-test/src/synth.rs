//! Synthetic page generators
//!
//! Deterministic stand-ins for rasterized document pages: blank pages,
//! solid blocks, text-like stripes and seeded pixel noise.

use pagediff_core::{Color, Raster, Rect};

/// Small linear-congruential generator for reproducible noise.
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    /// Create a generator from a seed
    pub fn new(seed: u64) -> Self {
        Self(seed ^ 0x5DEE_CE66_D)
    }

    /// Next raw 32-bit value
    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }

    /// Uniform value in `0..bound`
    pub fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound.max(1)
    }
}

/// A white page of the given size
pub fn blank_page(width: u32, height: u32) -> Raster {
    Raster::new_filled(width, height, Color::WHITE).expect("synthetic page dimensions")
}

/// Copy of `page` with a solid block painted over `rect`
pub fn with_block(page: &Raster, rect: Rect, fill: Color) -> Raster {
    let mut rm = page.to_mut();
    rm.fill_rect(rect, fill);
    rm.into()
}

/// A white page carrying dark horizontal stripes, roughly like lines of text
pub fn text_page(width: u32, height: u32, line_pitch: u32) -> Raster {
    let mut rm = blank_page(width, height).to_mut();
    let pitch = line_pitch.max(4) as i32;
    let mut y = pitch;
    while y + pitch / 2 < height as i32 {
        rm.fill_rect(
            Rect::new(width as i32 / 10, y, width as i32 * 8 / 10, pitch / 2),
            Color::new(30, 30, 30),
        );
        y += pitch;
    }
    rm.into()
}

/// Copy of `page` with `count` random pixels set to random colors
pub fn with_noise(page: &Raster, count: u32, seed: u64) -> Raster {
    let mut rng = Lcg::new(seed);
    let mut rm = page.to_mut();
    for _ in 0..count {
        let x = rng.below(page.width());
        let y = rng.below(page.height());
        let c = rng.next_u32();
        let _ = rm.set_rgb(x, y, (c >> 16) as u8, (c >> 8) as u8, c as u8);
    }
    rm.into()
}
