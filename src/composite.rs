//! Compositing the glow output over the visible surface.

use crate::basics::COVER_FULL;
use crate::pixfmt_rgba::{PixelFormat, PixfmtRgba32};
use crate::rendering_buffer::PixelGrid;

/// Source-over blend of `glow` onto `surface` (straight alpha).
///
/// Grids of different sizes composite their overlapping region only.
pub fn composite_over(surface: &mut PixelGrid, glow: &PixelGrid) {
    if !surface.same_size(glow) {
        log::warn!(
            "compositing {}x{} glow over {}x{} surface; clipping to overlap",
            glow.width(),
            glow.height(),
            surface.width(),
            surface.height()
        );
    }
    let w = surface.width().min(glow.width()) as i32;
    let h = surface.height().min(glow.height()) as i32;

    let mut pf = PixfmtRgba32::new(surface);
    for y in 0..h {
        for x in 0..w {
            if let Some(c) = glow.pixel(x, y) {
                if !c.is_transparent() {
                    pf.blend_pixel(x, y, &c, COVER_FULL);
                }
            }
        }
    }
}
