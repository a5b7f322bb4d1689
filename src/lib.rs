//! # agg-glow
//!
//! Occlusion-aware glow halos for 2D raster shapes.
//!
//! Shapes are drawn into three equally sized RGBA grids alongside the
//! visible surface:
//!
//! - **Color** — the RGB each glowing shape emits
//! - **Occlusion** — packed glow parameters per pixel (starting alpha, shape
//!   alpha, glow distance)
//! - **Output** — the computed halo, color plus intensity
//!
//! The glow pass treats every shape pixel as a seed and spreads its
//! intensity over the 8-connected neighborhood with a linear falloff. Each
//! output pixel keeps the brightest contribution, and glow bends around
//! occluding shapes instead of passing through them. The result is then
//! composited over the surface.
//!
//! ## Architecture
//!
//! 1. **Grids** — [`rendering_buffer::PixelGrid`]
//! 2. **Pixel formats** — surface blending, color copy, parameter packing
//! 3. **Clipping renderer** — [`renderer_base::RendererBase`]
//! 4. **Shapes** — rectangles and raster-font glyph runs
//! 5. **Glow pass** — [`glow::compute_glow`]
//! 6. **Compositing** — [`composite::composite_over`]
//!
//! [`canvas::GlowCanvas`] wires these together into a per-frame API.

// Foundation types
pub mod basics;
pub mod color;
pub mod config;
pub mod error;

// Grids, pixel formats, rendering
pub mod pixfmt_rgba;
pub mod renderer_base;
pub mod rendering_buffer;

// Shapes and fonts
pub mod fonts;
pub mod glyph_raster_bin;
pub mod shapes;

// Glow engine
pub mod canvas;
pub mod composite;
pub mod glow;
pub mod glow_params;

pub use canvas::GlowCanvas;
pub use color::Rgba8;
pub use config::GlowConfig;
pub use error::{GlowError, Result};
pub use glow::{compute_glow, compute_glow_into, GlowPropagator, GlowStats};
pub use glow_params::GlowParams;
pub use rendering_buffer::PixelGrid;
