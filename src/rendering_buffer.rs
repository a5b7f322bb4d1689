//! Rendering buffer — owned, row-oriented RGBA32 pixel grid.
//!
//! [`PixelGrid`] is the storage behind the visible surface and the three glow
//! rasters (Color, Occlusion, Output). Rows are top-down, 4 bytes per pixel,
//! stride `width * 4`. Row access mirrors a classic row accessor: it panics
//! on an out-of-range row. Pixel lookups are `Option`-based so the glow pass
//! can treat out-of-bounds coordinates as an ordinary base case.

use crate::color::Rgba8;

/// Bytes per pixel.
pub const BPP: usize = 4;

// ============================================================================
// PixelGrid
// ============================================================================

/// A width×height grid of RGBA32 pixels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelGrid {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelGrid {
    /// Allocate a zeroed grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * BPP],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.width as usize * BPP
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// `true` if both grids have identical dimensions.
    pub fn same_size(&self, other: &PixelGrid) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride() + x as usize * BPP
    }

    /// Get an immutable slice for row `y`.
    pub fn row_slice(&self, y: u32) -> &[u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    /// Get a mutable slice for row `y`.
    pub fn row_slice_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Pixel at (x, y), or `None` outside the grid.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let off = self.offset(x as u32, y as u32);
        let p = &self.data[off..off + BPP];
        Some(Rgba8 {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        })
    }

    /// Alpha channel at (x, y), or `None` outside the grid.
    #[inline]
    pub fn alpha(&self, x: i32, y: i32) -> Option<u8> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.data[self.offset(x as u32, y as u32) + 3])
    }

    /// Overwrite the pixel at (x, y). Returns `false` outside the grid.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, c: &Rgba8) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let off = self.offset(x as u32, y as u32);
        self.data[off..off + BPP].copy_from_slice(&[c.r, c.g, c.b, c.a]);
        true
    }

    /// Fill every byte in the grid with `value`.
    pub fn clear(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Fill every pixel with a solid color.
    pub fn fill(&mut self, c: &Rgba8) {
        for p in self.data.chunks_exact_mut(BPP) {
            p.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }

    /// Iterate over `(x, y, pixel)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32, Rgba8)> + '_ {
        let w = self.width.max(1) as usize;
        self.data.chunks_exact(BPP).enumerate().map(move |(i, p)| {
            (
                (i % w) as i32,
                (i / w) as i32,
                Rgba8 {
                    r: p[0],
                    g: p[1],
                    b: p[2],
                    a: p[3],
                },
            )
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
