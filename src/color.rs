//! 8-bit straight-alpha RGBA color.
//!
//! Every grid in the crate stores `Rgba8` pixels. The surface treats them as
//! colors, the occlusion grid reuses the four channels as packed glow
//! parameters (see [`crate::glow_params`]).

use crate::basics::CoverType;

// ============================================================================
// Rgba8 (8-bit per channel)
// ============================================================================

/// RGBA color with u8 components, non-premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_SHIFT: u32 = 8;
    pub const BASE_SCALE: u32 = 1 << Self::BASE_SHIFT;
    pub const BASE_MASK: u32 = Self::BASE_SCALE - 1;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    /// Build a color from wide components, clamping each to 0..=255.
    pub fn new(r: u32, g: u32, b: u32, a: u32) -> Self {
        Self {
            r: r.min(Self::BASE_MASK) as u8,
            g: g.min(Self::BASE_MASK) as u8,
            b: b.min(Self::BASE_MASK) as u8,
            a: a.min(Self::BASE_MASK) as u8,
        }
    }

    pub fn new_opaque(r: u32, g: u32, b: u32) -> Self {
        Self::new(r, g, b, Self::BASE_MASK)
    }

    pub fn with_opacity(c: &Rgba8, a: u32) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: a.min(Self::BASE_MASK) as u8,
        }
    }

    pub fn from_array(c: [u8; 4]) -> Self {
        Self {
            r: c[0],
            g: c[1],
            b: c[2],
            a: c[3],
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Same RGB, different alpha.
    pub fn same_rgb(&self, other: &Rgba8) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Fixed-point multiply, exact over u8.
    /// `(a * b + 128) >> 8`, with rounding correction.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    /// Multiply a color component by a cover.
    #[inline]
    pub fn mult_cover(a: u8, b: CoverType) -> u8 {
        Self::multiply(a, b)
    }

    /// Interpolate p to q by a.
    #[inline]
    pub fn lerp(p: u8, q: u8, a: u8) -> u8 {
        let t = (q as i32 - p as i32) * a as i32 + Self::BASE_MSB as i32 - (p > q) as i32;
        (p as i32 + (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT)) as u8
    }
}
