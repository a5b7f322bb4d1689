//! Glow parameter codec.
//!
//! The occlusion grid does not hold colors. Each pixel packs the glow
//! parameters of the shape covering it:
//!
//! | channel | meaning                                          |
//! |---------|--------------------------------------------------|
//! | R       | starting alpha (glow intensity at distance 0)    |
//! | G       | shape alpha (0 = no shape, >0 = seed / occluder) |
//! | B       | glow distance in pixels                          |
//! | A       | fixed 255                                        |
//!
//! A is pinned to 255 so the grid survives straight-alpha presentation
//! unchanged; the glow pass never reads it.

use crate::basics::CoverType;
use crate::color::Rgba8;

/// Decoded occlusion-grid pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlowParams {
    pub starting_alpha: u8,
    pub shape_alpha: u8,
    pub glow_distance: u8,
}

impl GlowParams {
    /// A shape that blocks glow but emits none.
    pub const OCCLUDER: GlowParams = GlowParams {
        starting_alpha: 0,
        shape_alpha: 255,
        glow_distance: 0,
    };

    /// Value of the A channel in every packed pixel.
    pub const MARKER: u8 = 255;

    /// Build parameters, clamping each field to 0..=255.
    pub fn new(starting_alpha: u32, shape_alpha: u32, glow_distance: u32) -> Self {
        Self {
            starting_alpha: starting_alpha.min(255) as u8,
            shape_alpha: shape_alpha.min(255) as u8,
            glow_distance: glow_distance.min(255) as u8,
        }
    }

    pub fn to_rgba8(&self) -> Rgba8 {
        Rgba8 {
            r: self.starting_alpha,
            g: self.shape_alpha,
            b: self.glow_distance,
            a: Self::MARKER,
        }
    }

    pub fn from_rgba8(c: &Rgba8) -> Self {
        Self {
            starting_alpha: c.r,
            shape_alpha: c.g,
            glow_distance: c.b,
        }
    }

    /// Any shape pixel, glowing or not.
    #[inline]
    pub fn is_seed(&self) -> bool {
        self.shape_alpha > 0
    }

    /// A shape pixel with a nonzero adjusted starting alpha.
    ///
    /// Says nothing about the glow distance; a glowing pixel with distance 0
    /// is an invalid seed.
    #[inline]
    pub fn is_glowing(&self) -> bool {
        self.adjusted_starting_alpha() > 0
    }

    /// Scale the shape alpha by a coverage value.
    pub fn with_coverage(&self, cover: CoverType) -> Self {
        Self {
            shape_alpha: Rgba8::mult_cover(self.shape_alpha, cover),
            ..*self
        }
    }

    /// Starting alpha weakened by the shape's own opacity:
    /// `starting_alpha * shape_alpha / 255`, rounded down.
    #[inline]
    pub fn adjusted_starting_alpha(&self) -> u8 {
        (self.starting_alpha as u32 * self.shape_alpha as u32 / 255) as u8
    }

    /// Per-hop intensity loss, `floor(adjusted / glow_distance)`, raised to
    /// `min_decrement` when that is larger (0 leaves the formula alone).
    ///
    /// A result of 0 is valid: the glow then floods everything reachable at
    /// the adjusted alpha. `None` when the distance is 0; the falloff is
    /// undefined there.
    pub fn decrement_per_step(&self, min_decrement: u8) -> Option<u8> {
        if self.glow_distance == 0 {
            return None;
        }
        let dec = self.adjusted_starting_alpha() / self.glow_distance;
        Some(dec.max(min_decrement))
    }
}

impl From<GlowParams> for Rgba8 {
    fn from(p: GlowParams) -> Self {
        p.to_rgba8()
    }
}

impl From<Rgba8> for GlowParams {
    fn from(c: Rgba8) -> Self {
        GlowParams::from_rgba8(&c)
    }
}
