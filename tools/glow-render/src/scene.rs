// Scene descriptions for glow-render.
//
// A scene is a canvas size, an optional glow configuration and a list of
// shapes drawn in order. Shapes with a `glow` block emit glow; shapes
// without one only occlude.

use agg_glow::basics::RectI;
use agg_glow::fonts::mono_5x7;
use agg_glow::{GlowCanvas, GlowConfig, GlowStats, Rgba8};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub config: GlowConfig,
    #[serde(default)]
    pub shapes: Vec<ShapeDesc>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GlowDesc {
    #[serde(default = "default_starting_alpha")]
    pub starting_alpha: u8,
    pub distance: u8,
}

fn default_starting_alpha() -> u8 {
    255
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeDesc {
    Rect {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: [u8; 4],
        #[serde(default)]
        glow: Option<GlowDesc>,
    },
    /// Built-in 5x7 font; `y` is the baseline.
    Text {
        x: i32,
        y: i32,
        text: String,
        color: [u8; 4],
        #[serde(default)]
        glow: Option<GlowDesc>,
    },
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        let scene: Scene = serde_json::from_str(&text)
            .with_context(|| format!("parsing scene {}", path.display()))?;
        scene.config.validate().context("invalid glow config")?;
        if scene.width == 0 || scene.height == 0 {
            bail!("scene size must be non-zero, got {}x{}", scene.width, scene.height);
        }
        Ok(scene)
    }

    /// Built-in scene: glowing panels and a title, split by a wall.
    pub fn demo() -> Self {
        let glow = |starting_alpha, distance| Some(GlowDesc { starting_alpha, distance });
        Scene {
            width: 320,
            height: 200,
            config: GlowConfig {
                background: [12, 14, 24, 255],
                ..GlowConfig::default()
            },
            shapes: vec![
                ShapeDesc::Rect {
                    x1: 30,
                    y1: 40,
                    x2: 90,
                    y2: 80,
                    color: [255, 120, 20, 255],
                    glow: glow(230, 28),
                },
                ShapeDesc::Rect {
                    x1: 200,
                    y1: 110,
                    x2: 280,
                    y2: 150,
                    color: [40, 180, 255, 160],
                    glow: glow(255, 36),
                },
                ShapeDesc::Rect {
                    x1: 150,
                    y1: 20,
                    x2: 156,
                    y2: 170,
                    color: [70, 70, 80, 255],
                    glow: None,
                },
                ShapeDesc::Text {
                    x: 40,
                    y: 150,
                    text: "AGG GLOW".to_string(),
                    color: [120, 255, 140, 255],
                    glow: glow(255, 14),
                },
                ShapeDesc::Text {
                    x: 190,
                    y: 60,
                    text: "SHADOW".to_string(),
                    color: [90, 90, 100, 255],
                    glow: None,
                },
            ],
        }
    }

    /// Seed every shape, run the glow pass and composite.
    pub fn render(&self) -> Result<(GlowCanvas, GlowStats)> {
        let mut canvas = GlowCanvas::with_size(self.width, self.height, self.config.clone());
        canvas.clear();

        for (i, shape) in self.shapes.iter().enumerate() {
            match shape {
                ShapeDesc::Rect {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                    glow,
                } => {
                    let rect = RectI::new(*x1, *y1, *x2, *y2);
                    let color = Rgba8::from_array(*color);
                    match glow {
                        Some(g) => canvas
                            .seed_glowing_rect(rect, color, g.starting_alpha, g.distance)
                            .with_context(|| format!("shape {}", i))?,
                        None => canvas.seed_occluder_rect(rect, color),
                    }
                }
                ShapeDesc::Text {
                    x,
                    y,
                    text,
                    color,
                    glow,
                } => {
                    let color = Rgba8::from_array(*color);
                    match glow {
                        Some(g) => canvas
                            .seed_glowing_text(
                                mono_5x7(),
                                *x,
                                *y,
                                text,
                                color,
                                g.starting_alpha,
                                g.distance,
                            )
                            .with_context(|| format!("shape {}", i))?,
                        None => canvas.seed_occluder_text(mono_5x7(), *x, *y, text, color),
                    }
                }
            }
        }

        let stats = canvas.compute_glow();
        canvas.composite_and_draw();
        Ok((canvas, stats))
    }
}
