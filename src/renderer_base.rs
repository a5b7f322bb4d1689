//! Clipping renderer.
//!
//! Shapes may lie partly or wholly outside the canvas. [`RendererBase`]
//! trims every run they emit to its clip box, so pixel formats only ever see
//! in-bounds coordinates.

use crate::basics::{CoverType, RectI};
use crate::pixfmt_rgba::PixelFormat;

/// A pixel format plus the rectangle it may be drawn in.
pub struct RendererBase<PF: PixelFormat> {
    ren: PF,
    clip_box: RectI,
}

impl<PF: PixelFormat> RendererBase<PF> {
    /// Clip box starts as the whole grid.
    pub fn new(ren: PF) -> Self {
        let clip_box = Self::grid_box(&ren);
        Self { ren, clip_box }
    }

    fn grid_box(ren: &PF) -> RectI {
        RectI::new(0, 0, ren.width() as i32 - 1, ren.height() as i32 - 1)
    }

    pub fn width(&self) -> u32 {
        self.ren.width()
    }

    pub fn height(&self) -> u32 {
        self.ren.height()
    }

    /// Narrow drawing to `(x1, y1)..=(x2, y2)` intersected with the grid.
    ///
    /// Returns `false` and clips everything away when the rectangle misses
    /// the grid.
    pub fn clip_box_i(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let mut cb = RectI::new(x1, y1, x2, y2);
        cb.normalize();
        if cb.clip(&Self::grid_box(&self.ren)) {
            self.clip_box = cb;
            true
        } else {
            self.clip_box = RectI::new(1, 1, 0, 0);
            false
        }
    }

    pub fn clip_box(&self) -> &RectI {
        &self.clip_box
    }

    pub fn xmin(&self) -> i32 {
        self.clip_box.x1
    }

    pub fn ymin(&self) -> i32 {
        self.clip_box.y1
    }

    pub fn xmax(&self) -> i32 {
        self.clip_box.x2
    }

    pub fn ymax(&self) -> i32 {
        self.clip_box.y2
    }

    /// Visible part of the inclusive run `x1..=x2` on row `y`, if any.
    #[inline]
    fn clip_run(&self, x1: i32, y: i32, x2: i32) -> Option<(i32, i32)> {
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        if y < self.ymin() || y > self.ymax() || hi < self.xmin() || lo > self.xmax() {
            return None;
        }
        Some((lo.max(self.xmin()), hi.min(self.xmax())))
    }

    /// Blend the inclusive run `x1..=x2` with uniform coverage.
    pub fn blend_hline(&mut self, x1: i32, y: i32, x2: i32, c: &PF::ColorType, cover: CoverType) {
        if let Some((lo, hi)) = self.clip_run(x1, y, x2) {
            self.ren.blend_hline(lo, y, (hi - lo + 1) as u32, c, cover);
        }
    }

    /// Blend `len` pixels from `x` with one coverage value per pixel.
    ///
    /// Coverage entries for clipped-off pixels are skipped.
    pub fn blend_solid_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: i32,
        c: &PF::ColorType,
        covers: &[CoverType],
    ) {
        let len = len.min(covers.len() as i32);
        if len <= 0 {
            return;
        }
        let Some((lo, hi)) = self.clip_run(x, y, x + len - 1) else {
            return;
        };
        let skip = (lo - x) as usize;
        self.ren
            .blend_solid_hspan(lo, y, (hi - lo + 1) as u32, c, &covers[skip..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;
    use crate::pixfmt_rgba::PixfmtRgba32;
    use crate::rendering_buffer::PixelGrid;

    const RED: Rgba8 = Rgba8 {
        r: 255,
        g: 0,
        b: 0,
        a: 255,
    };

    #[test]
    fn test_new_clip_box_is_full_grid() {
        let mut grid = PixelGrid::new(10, 6);
        let rb = RendererBase::new(PixfmtRgba32::new(&mut grid));
        assert_eq!(*rb.clip_box(), RectI::new(0, 0, 9, 5));
        assert_eq!(rb.width(), 10);
        assert_eq!(rb.height(), 6);
    }

    #[test]
    fn test_clip_box_i() {
        let mut grid = PixelGrid::new(10, 10);
        let mut rb = RendererBase::new(PixfmtRgba32::new(&mut grid));
        assert!(rb.clip_box_i(8, 8, 2, 20));
        assert_eq!(*rb.clip_box(), RectI::new(2, 8, 8, 9));
        assert!(!rb.clip_box_i(20, 20, 30, 30));
        assert!(!rb.clip_box().is_valid());
    }

    #[test]
    fn test_hline_clipped_to_grid() {
        let mut grid = PixelGrid::new(10, 10);
        {
            let mut rb = RendererBase::new(PixfmtRgba32::new(&mut grid));
            rb.blend_hline(20, 2, -5, &RED, 255);
            rb.blend_hline(0, -1, 5, &RED, 255);
            rb.blend_hline(0, 10, 5, &RED, 255);
        }
        for x in 0..10 {
            assert_eq!(grid.pixel(x, 2), Some(RED));
        }
        assert_eq!(grid.pixel(0, 1), Some(Rgba8::default()));
        assert_eq!(grid.pixel(0, 9), Some(Rgba8::default()));
    }

    #[test]
    fn test_hline_respects_clip_box() {
        let mut grid = PixelGrid::new(6, 3);
        {
            let mut rb = RendererBase::new(PixfmtRgba32::new(&mut grid));
            rb.clip_box_i(2, 0, 3, 2);
            rb.blend_hline(0, 1, 5, &RED, 255);
        }
        assert_eq!(grid.pixel(1, 1), Some(Rgba8::default()));
        assert_eq!(grid.pixel(2, 1), Some(RED));
        assert_eq!(grid.pixel(3, 1), Some(RED));
        assert_eq!(grid.pixel(4, 1), Some(Rgba8::default()));
    }

    #[test]
    fn test_hspan_clips_left() {
        let mut grid = PixelGrid::new(4, 1);
        {
            let mut rb = RendererBase::new(PixfmtRgba32::new(&mut grid));
            rb.blend_solid_hspan(-2, 0, 4, &RED, &[255, 255, 0, 255]);
        }
        assert_eq!(grid.pixel(0, 0), Some(Rgba8::default()));
        assert_eq!(grid.pixel(1, 0), Some(RED));
        assert_eq!(grid.pixel(2, 0), Some(Rgba8::default()));
    }

    #[test]
    fn test_hspan_clips_right() {
        let mut grid = PixelGrid::new(4, 1);
        {
            let mut rb = RendererBase::new(PixfmtRgba32::new(&mut grid));
            rb.blend_solid_hspan(2, 0, 5, &RED, &[255; 5]);
        }
        assert_eq!(grid.pixel(1, 0), Some(Rgba8::default()));
        assert_eq!(grid.pixel(2, 0), Some(RED));
        assert_eq!(grid.pixel(3, 0), Some(RED));
    }

    #[test]
    fn test_hspan_shorter_covers() {
        let mut grid = PixelGrid::new(4, 1);
        {
            let mut rb = RendererBase::new(PixfmtRgba32::new(&mut grid));
            rb.blend_solid_hspan(0, 0, 4, &RED, &[255, 255]);
        }
        assert_eq!(grid.pixel(1, 0), Some(RED));
        assert_eq!(grid.pixel(2, 0), Some(Rgba8::default()));
    }
}
