//! Per-frame host API.
//!
//! [`GlowCanvas`] owns a visible surface plus the three glow grids and drives
//! one frame at a time:
//!
//! ```text
//! configure(w, h) -> clear() -> seed_*() ... -> compute_glow() -> composite_and_draw()
//! ```
//!
//! Calls on an unconfigured canvas are silent no-ops so a render loop can
//! drop a frame instead of failing. The only rejected input is a glow
//! distance of 0, whose falloff is undefined.

use crate::basics::RectI;
use crate::color::Rgba8;
use crate::composite::composite_over;
use crate::config::GlowConfig;
use crate::error::{GlowError, Result};
use crate::glow::{compute_glow_into, GlowStats};
use crate::glow_params::GlowParams;
use crate::pixfmt_rgba::{PixfmtGlowColor, PixfmtGlowParams, PixfmtRgba32};
use crate::renderer_base::RendererBase;
use crate::rendering_buffer::PixelGrid;
use crate::shapes::{GlowShape, RectShape, TextShape};

struct Grids {
    surface: PixelGrid,
    color: PixelGrid,
    occlusion: PixelGrid,
    output: PixelGrid,
}

impl Grids {
    fn new(width: u32, height: u32) -> Self {
        Self {
            surface: PixelGrid::new(width, height),
            color: PixelGrid::new(width, height),
            occlusion: PixelGrid::new(width, height),
            output: PixelGrid::new(width, height),
        }
    }
}

/// Surface plus Color, Occlusion and Output grids of one size.
pub struct GlowCanvas {
    config: GlowConfig,
    grids: Option<Grids>,
}

impl GlowCanvas {
    /// An unconfigured canvas; call [`configure`](Self::configure) first.
    pub fn new(config: GlowConfig) -> Self {
        Self {
            config,
            grids: None,
        }
    }

    pub fn with_size(width: u32, height: u32, config: GlowConfig) -> Self {
        let mut canvas = Self::new(config);
        canvas.configure(width, height);
        canvas
    }

    pub fn config(&self) -> &GlowConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.grids.is_some()
    }

    pub fn width(&self) -> u32 {
        self.grids.as_ref().map_or(0, |g| g.surface.width())
    }

    pub fn height(&self) -> u32 {
        self.grids.as_ref().map_or(0, |g| g.surface.height())
    }

    /// (Re)allocate all grids. A zero dimension leaves the canvas
    /// unconfigured; an unchanged size keeps the existing allocation.
    pub fn configure(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("glow canvas configured with empty size {}x{}", width, height);
            self.grids = None;
            return;
        }
        if self.width() == width && self.height() == height {
            return;
        }
        log::debug!("allocating glow grids {}x{}", width, height);
        self.grids = Some(Grids::new(width, height));
    }

    /// Zero the three glow grids and fill the surface with the background.
    pub fn clear(&mut self) {
        let Some(grids) = self.grids.as_mut() else {
            log::debug!("clear on unconfigured glow canvas ignored");
            return;
        };
        grids.color.clear(0);
        grids.occlusion.clear(0);
        grids.output.clear(0);
        PixfmtRgba32::new(&mut grids.surface).clear(&self.config.background_color());
    }

    /// Draw a shape that glows.
    ///
    /// The shape is blended onto the surface, its RGB goes to the Color grid
    /// and `(starting_alpha, color.a × coverage, glow_distance)` to the
    /// Occlusion grid. `glow_distance` is capped at
    /// `config.max_glow_distance`.
    pub fn seed_glowing<S: GlowShape>(
        &mut self,
        shape: &S,
        color: Rgba8,
        starting_alpha: u8,
        glow_distance: u8,
    ) -> Result<()> {
        if glow_distance == 0 {
            return Err(GlowError::ZeroGlowDistance);
        }
        let Some(grids) = self.grids.as_mut() else {
            log::debug!("seed on unconfigured glow canvas ignored");
            return Ok(());
        };
        let distance = glow_distance.min(self.config.max_glow_distance);
        let params = GlowParams::new(starting_alpha as u32, color.a as u32, distance as u32);

        shape.render(
            &mut RendererBase::new(PixfmtRgba32::new(&mut grids.surface)),
            &color,
        );
        shape.render(
            &mut RendererBase::new(PixfmtGlowColor::new(&mut grids.color)),
            &color,
        );
        shape.render(
            &mut RendererBase::new(PixfmtGlowParams::new(&mut grids.occlusion)),
            &params,
        );
        Ok(())
    }

    /// Draw a shape that blocks glow without emitting any.
    pub fn seed_occluder<S: GlowShape>(&mut self, shape: &S, color: Rgba8) {
        let Some(grids) = self.grids.as_mut() else {
            log::debug!("occluder on unconfigured glow canvas ignored");
            return;
        };
        shape.render(
            &mut RendererBase::new(PixfmtRgba32::new(&mut grids.surface)),
            &color,
        );
        shape.render(
            &mut RendererBase::new(PixfmtGlowParams::new(&mut grids.occlusion)),
            &GlowParams::OCCLUDER,
        );
    }

    pub fn seed_glowing_rect(
        &mut self,
        rect: RectI,
        color: Rgba8,
        starting_alpha: u8,
        glow_distance: u8,
    ) -> Result<()> {
        let shape = RectShape::new(rect.x1, rect.y1, rect.x2, rect.y2);
        self.seed_glowing(&shape, color, starting_alpha, glow_distance)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn seed_glowing_text(
        &mut self,
        font: &[u8],
        x: i32,
        y: i32,
        text: &str,
        color: Rgba8,
        starting_alpha: u8,
        glow_distance: u8,
    ) -> Result<()> {
        let shape = TextShape::new(font, x, y, text);
        self.seed_glowing(&shape, color, starting_alpha, glow_distance)
    }

    pub fn seed_occluder_rect(&mut self, rect: RectI, color: Rgba8) {
        let shape = RectShape::new(rect.x1, rect.y1, rect.x2, rect.y2);
        self.seed_occluder(&shape, color);
    }

    pub fn seed_occluder_text(&mut self, font: &[u8], x: i32, y: i32, text: &str, color: Rgba8) {
        self.seed_occluder(&TextShape::new(font, x, y, text), color);
    }

    /// Fill the Output grid from the seeded Color and Occlusion grids.
    pub fn compute_glow(&mut self) -> GlowStats {
        let Some(grids) = self.grids.as_mut() else {
            log::debug!("compute_glow on unconfigured glow canvas ignored");
            return GlowStats::default();
        };
        match compute_glow_into(&grids.color, &grids.occlusion, &mut grids.output, &self.config) {
            Ok(stats) => stats,
            Err(e) => {
                log::warn!("glow pass skipped: {}", e);
                GlowStats::default()
            }
        }
    }

    /// Blend the Output grid over the surface.
    pub fn composite_and_draw(&mut self) {
        let Some(grids) = self.grids.as_mut() else {
            log::debug!("composite on unconfigured glow canvas ignored");
            return;
        };
        composite_over(&mut grids.surface, &grids.output);
    }

    pub fn surface(&self) -> Option<&PixelGrid> {
        self.grids.as_ref().map(|g| &g.surface)
    }

    pub fn color(&self) -> Option<&PixelGrid> {
        self.grids.as_ref().map(|g| &g.color)
    }

    pub fn occlusion(&self) -> Option<&PixelGrid> {
        self.grids.as_ref().map(|g| &g.occlusion)
    }

    pub fn output(&self) -> Option<&PixelGrid> {
        self.grids.as_ref().map(|g| &g.output)
    }
}

impl Default for GlowCanvas {
    fn default() -> Self {
        Self::new(GlowConfig::default())
    }
}
