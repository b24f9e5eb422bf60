//! Debug renderer
//!
//! Draws each region's box and id label onto a copy of a page, and
//! encodes the difference mask. Drawing goes through the small [`Canvas`]
//! trait so the renderer does not depend on a particular raster type;
//! [`RasterMut`] implements it with the built-in primitives.

use crate::error::{DiffError, DiffResult};
use crate::grid::DiffMask;
use crate::options::{AnnotationFormat, RenderStyle};
use pagediff_core::raster::text_extent;
use pagediff_core::{Color, Raster, RasterMut, Rect, Region};
use pagediff_io::{write_jpeg, write_png};

/// Minimal 2D drawing surface.
pub trait Canvas {
    /// Surface size as `(width, height)` in pixels
    fn canvas_size(&self) -> (u32, u32);

    /// Outline `rect` with a stroke `width` pixels wide, drawn inward
    fn stroke_rect(&mut self, rect: Rect, width: u32, color: Color);

    /// Fill `rect`
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw `text` with its top-left corner at `(x, y)`
    fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Color);

    /// Size of `text` as drawn by [`Canvas::draw_text`]
    fn text_size(&self, text: &str, scale: u32) -> (u32, u32);
}

impl Canvas for RasterMut {
    fn canvas_size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn stroke_rect(&mut self, rect: Rect, width: u32, color: Color) {
        self.render_box_color(rect, width, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        RasterMut::fill_rect(self, rect, color);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Color) {
        self.render_text(x, y, text, scale, color);
    }

    fn text_size(&self, text: &str, scale: u32) -> (u32, u32) {
        text_extent(text, scale)
    }
}

/// Where the id tag for a box goes.
///
/// The tag sits directly above the box's top-left corner. If that would
/// leave the canvas it moves just inside the box's top edge, and it is
/// shifted left when it would run past the right edge.
fn label_rect(boxed: Rect, tag_w: i32, tag_h: i32, canvas_w: i32) -> Rect {
    let mut y = boxed.y - tag_h;
    if y < 0 {
        y = boxed.y.max(0);
    }
    let mut x = boxed.x;
    if x + tag_w > canvas_w {
        x = canvas_w - tag_w;
    }
    Rect::new(x.max(0), y, tag_w, tag_h)
}

/// Draw every region onto `canvas`, in list order.
pub fn draw_regions<C: Canvas + ?Sized>(canvas: &mut C, regions: &[Region], style: &RenderStyle) {
    let (width, height) = canvas.canvas_size();
    let pad = style.label_padding as i32;

    for region in regions {
        let boxed = region.bounding_box.to_pixel_rect(width, height);
        canvas.stroke_rect(boxed, style.stroke_width, style.stroke_color);

        let (tw, th) = canvas.text_size(&region.id, style.label_scale);
        let tag = label_rect(
            boxed,
            tw as i32 + 2 * pad,
            th as i32 + 2 * pad,
            width as i32,
        );
        canvas.fill_rect(tag, style.label_background);
        canvas.draw_text(
            tag.x + pad,
            tag.y + pad,
            &region.id,
            style.label_scale,
            style.label_text,
        );
    }
}

/// Copy `image` and draw the regions onto the copy.
pub fn annotate(image: &Raster, regions: &[Region], style: &RenderStyle) -> Raster {
    let mut canvas = image.to_mut();
    draw_regions(&mut canvas, regions, style);
    canvas.into()
}

/// Encode an annotated page.
pub fn encode_annotated(image: &Raster, format: AnnotationFormat) -> DiffResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        AnnotationFormat::Jpeg { quality } => write_jpeg(image, &mut buffer, quality),
        AnnotationFormat::Png => write_png(image, &mut buffer),
    }
    .map_err(DiffError::EncodeFailure)?;
    Ok(buffer)
}

/// Encode the difference mask as PNG, keeping its binary alpha.
pub fn encode_mask(mask: &DiffMask) -> DiffResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_png(mask.raster(), &mut buffer).map_err(DiffError::EncodeFailure)?;
    Ok(buffer)
}
