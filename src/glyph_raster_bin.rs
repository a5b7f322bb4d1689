//! Binary raster glyph generator.
//!
//! Extracts 1-bit-per-pixel glyph bitmaps from raster font data for glyph-run
//! shapes. Coordinates are y-down; a glyph is positioned by its pen x and its
//! baseline y.
//!
//! Font data format:
//! - Byte 0: height
//! - Byte 1: baseline (rows below the baseline, i.e. descender rows)
//! - Byte 2: start_char (first ASCII code)
//! - Byte 3: num_chars
//! - Bytes 4..4+num_chars*2: glyph offset table (little-endian u16)
//! - Remaining bytes: per glyph, one width byte followed by the bitmap rows,
//!   bottom row first, 1 bit per pixel packed MSB-first

use crate::basics::{CoverType, COVER_FULL, COVER_NONE};

const HEADER_LEN: usize = 4;

// ============================================================================
// GlyphRect — bounding box of a glyph
// ============================================================================

/// Inclusive pixel box and horizontal advance of a prepared glyph.
///
/// `x2 < x1` marks a character the font does not contain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub dx: i32,
}

impl GlyphRect {
    pub fn is_empty(&self) -> bool {
        self.x2 < self.x1
    }
}

// ============================================================================
// GlyphRasterBin
// ============================================================================

/// Binary raster glyph generator over borrowed font data.
pub struct GlyphRasterBin<'a> {
    font: &'a [u8],
    span: Vec<CoverType>,
    bits: &'a [u8],
    glyph_width: u32,
    glyph_byte_width: u32,
}

impl<'a> GlyphRasterBin<'a> {
    pub fn new(font: &'a [u8]) -> Self {
        Self {
            font,
            span: vec![0; 32],
            bits: &[],
            glyph_width: 0,
            glyph_byte_width: 0,
        }
    }

    pub fn font(&self) -> &'a [u8] {
        self.font
    }

    /// `true` if the data is long enough to hold the header and offset table.
    pub fn is_valid(&self) -> bool {
        self.font.len() >= HEADER_LEN
            && self.font.len() >= HEADER_LEN + self.font[3] as usize * 2
            && self.font[0] > 0
    }

    /// Font height in pixels.
    pub fn height(&self) -> i32 {
        self.font.first().copied().unwrap_or(0) as i32
    }

    /// Rows below the baseline.
    pub fn base_line(&self) -> i32 {
        self.font.get(1).copied().unwrap_or(0) as i32
    }

    /// Location of a glyph's width byte, or `None` if the font lacks it.
    fn glyph_start(&self, glyph: u8) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        let start_char = self.font[2] as u32;
        let num_chars = self.font[3] as u32;
        let glyph = glyph as u32;
        if glyph < start_char || glyph >= start_char + num_chars {
            return None;
        }
        let offset = self.value(HEADER_LEN + (glyph - start_char) as usize * 2) as usize;
        let start = HEADER_LEN + num_chars as usize * 2 + offset;
        (start < self.font.len()).then_some(start)
    }

    /// Total advance of a string in pixels.
    pub fn width(&self, s: &str) -> i32 {
        s.bytes()
            .filter_map(|ch| self.glyph_start(ch))
            .map(|start| self.font[start] as i32)
            .sum()
    }

    /// Prepare a glyph whose pen position is (x, baseline y).
    pub fn prepare(&mut self, x: i32, y: i32, glyph: u8) -> GlyphRect {
        let Some(start) = self.glyph_start(glyph) else {
            self.glyph_width = 0;
            self.glyph_byte_width = 0;
            self.bits = &[];
            return GlyphRect {
                x1: 1,
                x2: 0,
                ..GlyphRect::default()
            };
        };

        self.glyph_width = self.font[start] as u32;
        self.glyph_byte_width = (self.glyph_width + 7) >> 3;
        self.bits = &self.font[start + 1..];

        if self.span.len() < self.glyph_width as usize {
            self.span.resize(self.glyph_width as usize, 0);
        }

        let y1 = y - (self.height() - self.base_line());
        GlyphRect {
            x1: x,
            y1,
            x2: x + self.glyph_width as i32 - 1,
            y2: y1 + self.height() - 1,
            dx: self.glyph_width as i32,
        }
    }

    /// Coverage for glyph row `i` (0 = top row) of the prepared glyph.
    pub fn span(&mut self, i: u32) -> &[CoverType] {
        let w = self.glyph_width as usize;
        if w == 0 || self.bits.is_empty() || i >= self.height() as u32 {
            return &self.span[..0];
        }
        // Rows are stored bottom-to-top.
        let row = self.height() as u32 - i - 1;
        let row_start = (row * self.glyph_byte_width) as usize;
        if row_start >= self.bits.len() {
            self.span[..w].fill(COVER_NONE);
            return &self.span[..w];
        }
        let bits = &self.bits[row_start..];
        for j in 0..w {
            let byte = bits.get(j >> 3).copied().unwrap_or(0);
            self.span[j] = if byte & (0x80 >> (j & 7)) != 0 {
                COVER_FULL
            } else {
                COVER_NONE
            };
        }
        &self.span[..w]
    }

    /// Read a little-endian u16 from font data at offset.
    fn value(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.font[offset], self.font[offset + 1]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // height=2, baseline=0, start_char='A', num_chars=1; glyph 'A' is 2 wide.
    // Stored bottom-up: bottom row = 0b11, top row = 0b01.
    fn make_test_font() -> Vec<u8> {
        vec![2, 0, 65, 1, 0, 0, 2, 0b1100_0000, 0b0100_0000]
    }

    #[test]
    fn test_font_properties() {
        let font = make_test_font();
        let glyph = GlyphRasterBin::new(&font);
        assert!(glyph.is_valid());
        assert_eq!(glyph.height(), 2);
        assert_eq!(glyph.base_line(), 0);
    }

    #[test]
    fn test_prepare_glyph() {
        let font = make_test_font();
        let mut glyph = GlyphRasterBin::new(&font);
        let r = glyph.prepare(10, 5, b'A');
        assert_eq!(r.x1, 10);
        assert_eq!(r.x2, 11);
        assert_eq!(r.y1, 3);
        assert_eq!(r.y2, 4);
        assert_eq!(r.dx, 2);
    }

    #[test]
    fn test_prepare_missing_glyph() {
        let font = make_test_font();
        let mut glyph = GlyphRasterBin::new(&font);
        let r = glyph.prepare(0, 0, b'Z');
        assert!(r.is_empty());
        assert_eq!(r.dx, 0);
        assert!(glyph.span(0).is_empty());
    }

    #[test]
    fn test_span_top_row_first() {
        let font = make_test_font();
        let mut glyph = GlyphRasterBin::new(&font);
        glyph.prepare(0, 0, b'A');

        let s0 = glyph.span(0);
        assert_eq!(s0, &[0, 255]);
        let s1 = glyph.span(1);
        assert_eq!(s1, &[255, 255]);
        assert!(glyph.span(2).is_empty());
    }

    #[test]
    fn test_width_calculation() {
        let font = make_test_font();
        let glyph = GlyphRasterBin::new(&font);
        assert_eq!(glyph.width("A"), 2);
        assert_eq!(glyph.width("AxA"), 4);
    }

    #[test]
    fn test_truncated_font_is_invalid() {
        let font = [8u8, 1, 32];
        let mut glyph = GlyphRasterBin::new(&font);
        assert!(!glyph.is_valid());
        assert!(glyph.prepare(0, 0, b' ').is_empty());
    }
}
