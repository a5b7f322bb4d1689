//! Glow propagation engine.
//!
//! Computes the Output grid from the Color and Occlusion grids. Every pixel
//! of the Occlusion grid with a nonzero shape alpha is a seed; its glow
//! spreads over the 8-connected neighborhood, losing a fixed amount of
//! intensity per hop, and each Output pixel keeps the highest intensity any
//! seed delivers ("best value wins"). Glow never paints over shape pixels
//! except at a partially transparent seed itself, and it stops when it runs
//! into another shape, so it bends around thin occluders instead of passing
//! through them.
//!
//! The spread is an explicit FIFO worklist rather than recursion. A node is
//! admitted only if it strictly improves the stored Output alpha, which both
//! bounds the work and makes the result independent of seed order.

use std::collections::VecDeque;

use crate::color::Rgba8;
use crate::config::GlowConfig;
use crate::error::{GlowError, Result};
use crate::glow_params::GlowParams;
use crate::rendering_buffer::PixelGrid;

/// N, NE, E, SE, S, SW, W, NW.
const NEIGHBORS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Work counters for one propagator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Nodes popped from the worklist.
    pub visited: u64,
    /// Output pixels overwritten.
    pub written: u64,
}

/// Summary of one scene pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlowStats {
    /// Seeds that emitted glow.
    pub seeds: u64,
    /// Seeds skipped because their glow distance was 0.
    pub invalid_seeds: u64,
    pub visited: u64,
    pub written: u64,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    x: i32,
    y: i32,
    alpha: i32,
    origin: bool,
}

// ============================================================================
// GlowPropagator
// ============================================================================

/// Spreads glow from single seeds into an Output grid.
///
/// Scoped to one pass: the worklist and the optional "best alpha queued"
/// grid are sized for one set of grid dimensions.
pub struct GlowPropagator {
    width: u32,
    height: u32,
    queue: VecDeque<Node>,
    queued: Option<Vec<u8>>,
    stats: PropagationStats,
}

impl GlowPropagator {
    pub fn new(width: u32, height: u32, dedup_frontier: bool) -> Self {
        Self {
            width,
            height,
            queue: VecDeque::new(),
            queued: dedup_frontier.then(|| vec![0u8; width as usize * height as usize]),
            stats: PropagationStats::default(),
        }
    }

    pub fn stats(&self) -> PropagationStats {
        self.stats
    }

    /// Spread `glow_color` from `(x, y)` starting at intensity `alpha`.
    ///
    /// `occlusion` and `output` must both be `width × height`. The starting
    /// node is treated as the seed itself when `is_source_origin` is set:
    /// it may be a shape pixel and still spread, and if it is a partially
    /// transparent shape pixel it receives glow clamped to its own shape
    /// alpha.
    #[allow(clippy::too_many_arguments)]
    pub fn propagate(
        &mut self,
        occlusion: &PixelGrid,
        output: &mut PixelGrid,
        x: i32,
        y: i32,
        glow_color: Rgba8,
        alpha: i32,
        decrement_per_step: i32,
        is_source_origin: bool,
    ) {
        debug_assert!(occlusion.same_size(output));
        debug_assert!(occlusion.width() == self.width && occlusion.height() == self.height);

        self.queue.clear();
        self.queue.push_back(Node {
            x,
            y,
            alpha,
            origin: is_source_origin,
        });

        while let Some(node) = self.queue.pop_front() {
            self.stats.visited += 1;

            let (Some(params), Some(stored)) =
                (occlusion.pixel(node.x, node.y), output.alpha(node.x, node.y))
            else {
                continue;
            };
            let shape_alpha = params.g as i32;
            let stored = stored as i32;

            if node.alpha <= stored {
                continue;
            }

            let eligible = shape_alpha == 0 || (node.origin && shape_alpha < 255);
            let mut alpha = node.alpha;
            if eligible {
                let mut written = alpha;
                if node.origin && shape_alpha > 0 && written > shape_alpha {
                    written = shape_alpha;
                }
                let written = written.clamp(0, 255);
                if written > stored {
                    output.set_pixel(
                        node.x,
                        node.y,
                        &Rgba8 {
                            r: glow_color.r,
                            g: glow_color.g,
                            b: glow_color.b,
                            a: written as u8,
                        },
                    );
                    self.stats.written += 1;
                }
            } else if !node.origin {
                alpha = 0;
            }

            let next = alpha - decrement_per_step;
            if next <= 0 {
                continue;
            }

            for (dx, dy) in NEIGHBORS {
                self.enqueue(occlusion, output, node.x + dx, node.y + dy, next);
            }
        }
    }

    #[inline]
    fn enqueue(&mut self, occlusion: &PixelGrid, output: &PixelGrid, x: i32, y: i32, alpha: i32) {
        let node = Node {
            x,
            y,
            alpha,
            origin: false,
        };
        let Some(queued) = self.queued.as_mut() else {
            self.queue.push_back(node);
            return;
        };

        if !occlusion.in_bounds(x, y) {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        let best = queued[idx] as i32;
        // Shape pixels reached from a neighbor halt without writing.
        let is_shape = occlusion
            .pixel(x, y)
            .is_some_and(|p| GlowParams::from_rgba8(&p).is_seed());
        let stored = output.alpha(x, y).unwrap_or(u8::MAX) as i32;
        if is_shape || alpha <= best || alpha <= stored {
            return;
        }
        queued[idx] = alpha.min(255) as u8;
        self.queue.push_back(node);
    }
}

// ============================================================================
// Scene pass
// ============================================================================

fn check_size(expected: &PixelGrid, found: &PixelGrid) -> Result<()> {
    if expected.same_size(found) {
        Ok(())
    } else {
        Err(GlowError::DimensionMismatch {
            expected: (expected.width(), expected.height()),
            found: (found.width(), found.height()),
        })
    }
}

/// Run the glow pass into an existing Output grid.
///
/// The Output grid is not cleared first, so glow accumulates (by maximum)
/// over whatever it already holds.
pub fn compute_glow_into(
    color: &PixelGrid,
    occlusion: &PixelGrid,
    output: &mut PixelGrid,
    config: &GlowConfig,
) -> Result<GlowStats> {
    check_size(color, occlusion)?;
    check_size(color, output)?;

    let mut stats = GlowStats::default();
    let mut propagator =
        GlowPropagator::new(occlusion.width(), occlusion.height(), config.dedup_frontier);

    for y in 0..occlusion.height() as i32 {
        for x in 0..occlusion.width() as i32 {
            let Some(packed) = occlusion.pixel(x, y) else {
                continue;
            };
            let params = GlowParams::from_rgba8(&packed);
            if !params.is_glowing() {
                continue;
            }
            let adjusted = params.adjusted_starting_alpha();
            let Some(decrement) = params.decrement_per_step(config.min_decrement) else {
                stats.invalid_seeds += 1;
                continue;
            };
            let glow_color = color.pixel(x, y).unwrap_or_default();
            log::trace!(
                "seed ({}, {}): alpha {} decrement {} distance {}",
                x,
                y,
                adjusted,
                decrement,
                params.glow_distance
            );
            propagator.propagate(
                occlusion,
                output,
                x,
                y,
                glow_color,
                adjusted as i32,
                decrement as i32,
                true,
            );
            stats.seeds += 1;
        }
    }

    if stats.invalid_seeds > 0 {
        log::warn!(
            "skipped {} glow seeds with zero glow distance",
            stats.invalid_seeds
        );
    }

    let work = propagator.stats();
    stats.visited = work.visited;
    stats.written = work.written;
    log::debug!(
        "glow pass {}x{}: {} seeds, {} visited, {} written",
        occlusion.width(),
        occlusion.height(),
        stats.seeds,
        stats.visited,
        stats.written
    );
    Ok(stats)
}

/// Run the glow pass into a fresh Output grid.
pub fn compute_glow(
    color: &PixelGrid,
    occlusion: &PixelGrid,
    config: &GlowConfig,
) -> Result<PixelGrid> {
    let mut output = PixelGrid::new(color.width(), color.height());
    compute_glow_into(color, occlusion, &mut output, config)?;
    Ok(output)
}

// ============================================================================
// Tests
// ============================================================================
