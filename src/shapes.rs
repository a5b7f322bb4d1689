//! Shapes that can be seeded into the glow rasters.
//!
//! A shape only knows how to emit coverage spans into a clipping renderer.
//! The canvas renders the same shape once per grid, each time through a
//! different pixel format, which keeps the surface, Color and Occlusion grids
//! pixel-aligned by construction.

use crate::basics::{RectI, COVER_FULL};
use crate::glyph_raster_bin::GlyphRasterBin;
use crate::pixfmt_rgba::PixelFormat;
use crate::renderer_base::RendererBase;

/// Anything that can be rasterized into a [`RendererBase`].
pub trait GlowShape {
    fn render<PF: PixelFormat>(&self, ren: &mut RendererBase<PF>, c: &PF::ColorType);
}

// ============================================================================
// RectShape
// ============================================================================

/// Axis-aligned filled rectangle with inclusive integer corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectShape {
    pub rect: RectI,
}

impl RectShape {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let mut rect = RectI::new(x1, y1, x2, y2);
        rect.normalize();
        Self { rect }
    }

    /// Rectangle from an origin and a size, like a canvas `fillRect`.
    pub fn from_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            rect: RectI::from_size(x, y, width, height),
        }
    }
}

impl GlowShape for RectShape {
    fn render<PF: PixelFormat>(&self, ren: &mut RendererBase<PF>, c: &PF::ColorType) {
        if !self.rect.is_valid() {
            return;
        }
        let y1 = self.rect.y1.max(ren.ymin());
        let y2 = self.rect.y2.min(ren.ymax());
        for y in y1..=y2 {
            ren.blend_hline(self.rect.x1, y, self.rect.x2, c, COVER_FULL);
        }
    }
}

// ============================================================================
// TextShape
// ============================================================================

/// A horizontal glyph run in a binary raster font.
///
/// `(x, y)` is the pen position on the baseline, y-down.
#[derive(Debug, Clone, Copy)]
pub struct TextShape<'a> {
    pub font: &'a [u8],
    pub x: i32,
    pub y: i32,
    pub text: &'a str,
}

impl<'a> TextShape<'a> {
    pub fn new(font: &'a [u8], x: i32, y: i32, text: &'a str) -> Self {
        Self { font, x, y, text }
    }

    /// Advance of the whole run in pixels.
    pub fn width(&self) -> i32 {
        GlyphRasterBin::new(self.font).width(self.text)
    }
}

impl GlowShape for TextShape<'_> {
    fn render<PF: PixelFormat>(&self, ren: &mut RendererBase<PF>, c: &PF::ColorType) {
        let mut glyph = GlyphRasterBin::new(self.font);
        if !glyph.is_valid() {
            log::warn!("text shape skipped: raster font data is truncated");
            return;
        }
        let mut x = self.x;
        for ch in self.text.bytes() {
            let r = glyph.prepare(x, self.y, ch);
            if !r.is_empty() {
                for i in r.y1..=r.y2 {
                    let span = glyph.span((i - r.y1) as u32);
                    ren.blend_solid_hspan(r.x1, i, r.x2 - r.x1 + 1, c, span);
                }
            }
            x += r.dx;
        }
    }
}
