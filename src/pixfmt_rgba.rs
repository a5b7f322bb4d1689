//! RGBA pixel formats.
//!
//! A pixel format decides what "drawing a color with some coverage" means for
//! one grid. The glow canvas draws every shape three times, once per grid,
//! each through its own format:
//!
//! - [`PixfmtRgba32`]: straight-alpha blending, used for the visible surface
//!   and for compositing the glow output over it.
//! - [`PixfmtGlowColor`]: copies the emitted RGB into the Color grid.
//! - [`PixfmtGlowParams`]: packs [`GlowParams`] into the Occlusion grid.
//!
//! Formats do no clipping; [`crate::renderer_base::RendererBase`] clips
//! before delegating.

use crate::basics::{CoverType, COVER_NONE};
use crate::color::Rgba8;
use crate::glow_params::GlowParams;
use crate::rendering_buffer::{PixelGrid, BPP};

// ============================================================================
// PixelFormat trait
// ============================================================================

/// Trait for pixel formats that can write colors into a grid.
pub trait PixelFormat {
    type ColorType;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Blend a single pixel at (x, y) with color `c` and coverage `cover`.
    fn blend_pixel(&mut self, x: i32, y: i32, c: &Self::ColorType, cover: CoverType);

    /// Blend a horizontal line of `len` pixels at (x, y) with uniform color and coverage.
    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Self::ColorType, cover: CoverType) {
        for i in 0..len as i32 {
            self.blend_pixel(x + i, y, c, cover);
        }
    }

    /// Blend a horizontal span of `len` pixels with per-pixel coverage values.
    fn blend_solid_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        c: &Self::ColorType,
        covers: &[CoverType],
    ) {
        for (i, &cov) in covers.iter().enumerate().take(len as usize) {
            self.blend_pixel(x + i as i32, y, c, cov);
        }
    }

    /// Copy (overwrite) a single pixel at (x, y) with color `c`.
    fn copy_pixel(&mut self, x: i32, y: i32, c: &Self::ColorType);

    /// Get the pixel value at (x, y).
    fn pixel(&self, x: i32, y: i32) -> Self::ColorType;
}

#[inline]
fn pixel_mut(grid: &mut PixelGrid, x: i32, y: i32) -> &mut [u8] {
    let off = x as usize * BPP;
    &mut grid.row_slice_mut(y as u32)[off..off + BPP]
}

#[inline]
fn write(p: &mut [u8], c: &Rgba8) {
    p[0] = c.r;
    p[1] = c.g;
    p[2] = c.b;
    p[3] = c.a;
}

// ============================================================================
// PixfmtRgba32 — non-premultiplied RGBA, 8 bits per channel
// ============================================================================

/// Straight-alpha RGBA32 pixel format (R=0, G=1, B=2, A=3).
pub struct PixfmtRgba32<'a> {
    grid: &'a mut PixelGrid,
}

impl<'a> PixfmtRgba32<'a> {
    pub fn new(grid: &'a mut PixelGrid) -> Self {
        Self { grid }
    }

    /// Clear the entire grid to a solid color.
    pub fn clear(&mut self, c: &Rgba8) {
        self.grid.fill(c);
    }

    #[inline]
    fn blend_pix(p: &mut [u8], cr: u8, cg: u8, cb: u8, alpha: u8) {
        p[0] = Rgba8::lerp(p[0], cr, alpha);
        p[1] = Rgba8::lerp(p[1], cg, alpha);
        p[2] = Rgba8::lerp(p[2], cb, alpha);
        p[3] = Rgba8::lerp(p[3], 255, alpha);
    }
}

impl<'a> PixelFormat for PixfmtRgba32<'a> {
    type ColorType = Rgba8;

    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        self.grid.pixel(x, y).unwrap_or_default()
    }

    fn copy_pixel(&mut self, x: i32, y: i32, c: &Rgba8) {
        write(pixel_mut(self.grid, x, y), c);
    }

    fn blend_pixel(&mut self, x: i32, y: i32, c: &Rgba8, cover: CoverType) {
        let alpha = Rgba8::mult_cover(c.a, cover);
        if alpha == 0 {
            return;
        }
        let p = pixel_mut(self.grid, x, y);
        if alpha == 255 {
            write(p, &Rgba8::with_opacity(c, 255));
        } else {
            Self::blend_pix(p, c.r, c.g, c.b, alpha);
        }
    }
}

// ============================================================================
// PixfmtGlowColor — emitted color for the glow pass
// ============================================================================

/// Writes the emitted RGB of a glowing shape into the Color grid.
///
/// Any nonzero coverage overwrites the pixel; A is always 255 since the glow
/// pass ignores it.
pub struct PixfmtGlowColor<'a> {
    grid: &'a mut PixelGrid,
}

impl<'a> PixfmtGlowColor<'a> {
    pub fn new(grid: &'a mut PixelGrid) -> Self {
        Self { grid }
    }
}

impl<'a> PixelFormat for PixfmtGlowColor<'a> {
    type ColorType = Rgba8;

    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        self.grid.pixel(x, y).unwrap_or_default()
    }

    fn copy_pixel(&mut self, x: i32, y: i32, c: &Rgba8) {
        write(pixel_mut(self.grid, x, y), &Rgba8::with_opacity(c, 255));
    }

    fn blend_pixel(&mut self, x: i32, y: i32, c: &Rgba8, cover: CoverType) {
        if cover != COVER_NONE {
            self.copy_pixel(x, y, c);
        }
    }
}

// ============================================================================
// PixfmtGlowParams — packed parameters for the glow pass
// ============================================================================

/// Packs [`GlowParams`] into the Occlusion grid.
///
/// Later shapes overwrite earlier ones. Partial coverage scales the shape
/// alpha, so anti-aliased edges become weaker seeds.
pub struct PixfmtGlowParams<'a> {
    grid: &'a mut PixelGrid,
}

impl<'a> PixfmtGlowParams<'a> {
    pub fn new(grid: &'a mut PixelGrid) -> Self {
        Self { grid }
    }
}

impl<'a> PixelFormat for PixfmtGlowParams<'a> {
    type ColorType = GlowParams;

    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn pixel(&self, x: i32, y: i32) -> GlowParams {
        self.grid
            .pixel(x, y)
            .map(|c| GlowParams::from_rgba8(&c))
            .unwrap_or_default()
    }

    fn copy_pixel(&mut self, x: i32, y: i32, c: &GlowParams) {
        write(pixel_mut(self.grid, x, y), &c.to_rgba8());
    }

    fn blend_pixel(&mut self, x: i32, y: i32, c: &GlowParams, cover: CoverType) {
        if cover != COVER_NONE {
            self.copy_pixel(x, y, &c.with_coverage(cover));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
