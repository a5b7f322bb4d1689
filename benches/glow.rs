//! Glow pass benchmarks.

use agg_glow::basics::RectI;
use agg_glow::fonts::mono_5x7;
use agg_glow::{compute_glow, GlowCanvas, GlowConfig, GlowParams, GlowPropagator, PixelGrid, Rgba8};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// ============================================================================
// Scenes
// ============================================================================

fn scene(width: u32, height: u32) -> GlowCanvas {
    let mut canvas = GlowCanvas::with_size(width, height, GlowConfig::default());
    canvas.clear();
    let w = width as i32;
    let h = height as i32;
    for i in 0..4 {
        let x = 10 + i * (w / 5);
        canvas
            .seed_glowing_rect(
                RectI::new(x, h / 4, x + w / 12, h / 4 + h / 10),
                Rgba8::new_opaque(255, 60 * i as u32, 0),
                230,
                24,
            )
            .ok();
    }
    canvas
        .seed_glowing_text(mono_5x7(), w / 3, h / 2, "GLOW BENCH", Rgba8::new(0, 200, 255, 200), 255, 16)
        .ok();
    canvas.seed_occluder_rect(RectI::new(w / 2, 0, w / 2 + 3, h * 3 / 4), Rgba8::new_opaque(40, 40, 40));
    canvas.seed_occluder_rect(RectI::new(0, h * 2 / 3, w * 2 / 3, h * 2 / 3 + 2), Rgba8::new_opaque(40, 40, 40));
    canvas
}

// ============================================================================
// Scene pass
// ============================================================================

fn bench_scene_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_pass");
    group.sample_size(20);

    for &(w, h) in &[(160u32, 120u32), (320, 240)] {
        let canvas = scene(w, h);
        let (Some(color), Some(occlusion)) = (canvas.color(), canvas.occlusion()) else {
            continue;
        };
        group.throughput(Throughput::Elements(w as u64 * h as u64));

        for dedup in [true, false] {
            let config = GlowConfig {
                dedup_frontier: dedup,
                ..GlowConfig::default()
            };
            let label = if dedup { "dedup" } else { "plain" };
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}x{}", w, h)),
                &config,
                |b, config| {
                    b.iter(|| black_box(compute_glow(color, occlusion, config).unwrap()))
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Single seed
// ============================================================================

fn bench_single_seed(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_seed");
    let (w, h) = (128u32, 128u32);
    let white = Rgba8::new_opaque(255, 255, 255);

    for &distance in &[8u32, 32, 64] {
        let params = GlowParams::new(255, 255, distance);
        let mut occlusion = PixelGrid::new(w, h);
        occlusion.set_pixel(64, 64, &params.to_rgba8());
        let decrement = params.decrement_per_step(0).unwrap_or(0) as i32;

        group.bench_with_input(BenchmarkId::from_parameter(distance), &occlusion, |b, occlusion| {
            b.iter(|| {
                let mut output = PixelGrid::new(w, h);
                let mut p = GlowPropagator::new(w, h, true);
                p.propagate(occlusion, &mut output, 64, 64, white, 255, decrement, true);
                black_box(output)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scene_pass, bench_single_seed);
criterion_main!(benches);
