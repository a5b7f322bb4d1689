// BMP output for rendered canvases.

use agg_glow::PixelGrid;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `grid` as a top-down 32-bit BMP.
pub fn save_bmp(path: &Path, grid: &PixelGrid) -> io::Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    write_bmp(&mut f, grid)?;
    f.flush()
}

pub fn write_bmp<W: Write>(out: &mut W, grid: &PixelGrid) -> io::Result<()> {
    let w = grid.width();
    let h = grid.height();
    let row_size = w * 4;
    let image_size = row_size * h;
    let file_size = 14 + 40 + image_size;

    // BMP file header (14 bytes)
    out.write_all(b"BM")?;
    out.write_all(&file_size.to_le_bytes())?;
    out.write_all(&[0u8; 4])?; // reserved
    out.write_all(&(14u32 + 40).to_le_bytes())?; // pixel data offset

    // BITMAPINFOHEADER (40 bytes)
    out.write_all(&40u32.to_le_bytes())?;
    out.write_all(&w.to_le_bytes())?;
    out.write_all(&(-(h as i32)).to_le_bytes())?; // negative height = top-down
    out.write_all(&1u16.to_le_bytes())?; // planes
    out.write_all(&32u16.to_le_bytes())?; // bits per pixel
    out.write_all(&0u32.to_le_bytes())?; // BI_RGB
    out.write_all(&image_size.to_le_bytes())?;
    out.write_all(&[0u8; 8])?; // pixels per meter
    out.write_all(&0u32.to_le_bytes())?; // colors used
    out.write_all(&0u32.to_le_bytes())?; // important colors

    // RGBA -> BGRA
    let mut row = vec![0u8; row_size as usize];
    for y in 0..h {
        for (src, dst) in grid.row_slice(y).chunks_exact(4).zip(row.chunks_exact_mut(4)) {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = src[3];
        }
        out.write_all(&row)?;
    }
    Ok(())
}
