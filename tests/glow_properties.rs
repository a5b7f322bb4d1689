//! End-to-end properties of the glow pass.

use agg_glow::basics::RectI;
use agg_glow::fonts::mono_5x7;
use agg_glow::{
    compute_glow, compute_glow_into, GlowCanvas, GlowConfig, GlowParams, GlowPropagator,
    PixelGrid, Rgba8,
};

const WHITE: Rgba8 = Rgba8 {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

fn seed(color: &mut PixelGrid, occlusion: &mut PixelGrid, x: i32, y: i32, c: Rgba8, p: GlowParams) {
    color.set_pixel(x, y, &c);
    occlusion.set_pixel(x, y, &p.to_rgba8());
}

fn busy_scene() -> GlowCanvas {
    let mut canvas = GlowCanvas::with_size(64, 48, GlowConfig::default());
    canvas.clear();
    canvas
        .seed_glowing_rect(RectI::new(5, 5, 14, 12), Rgba8::new_opaque(255, 80, 0), 220, 12)
        .unwrap();
    canvas
        .seed_glowing_rect(
            RectI::new(30, 20, 33, 40),
            Rgba8::new(0, 160, 255, 140),
            255,
            9,
        )
        .unwrap();
    canvas
        .seed_glowing_text(mono_5x7(), 40, 12, "GLOW", Rgba8::new_opaque(0, 255, 90), 200, 6)
        .unwrap();
    canvas.seed_occluder_rect(RectI::new(18, 2, 19, 30), Rgba8::new_opaque(60, 60, 60));
    canvas.seed_occluder_rect(RectI::new(0, 20, 25, 20), Rgba8::new_opaque(60, 60, 60));
    canvas
}

#[test_log::test]
fn second_pass_changes_nothing() {
    let canvas = busy_scene();
    let color = canvas.color().unwrap();
    let occlusion = canvas.occlusion().unwrap();
    let config = GlowConfig::default();

    let mut output = PixelGrid::new(64, 48);
    let first = compute_glow_into(color, occlusion, &mut output, &config).unwrap();
    let snapshot = output.clone();
    let second = compute_glow_into(color, occlusion, &mut output, &config).unwrap();

    assert!(first.written > 0);
    assert_eq!(second.written, 0);
    assert_eq!(output, snapshot);
}

#[test_log::test]
fn overlapping_glows_take_the_maximum() {
    let config = GlowConfig::default();
    let (w, h) = (40, 20);

    let mut color_a = PixelGrid::new(w, h);
    let mut occ_a = PixelGrid::new(w, h);
    seed(&mut color_a, &mut occ_a, 10, 10, WHITE, GlowParams::new(240, 255, 12));

    let mut color_b = PixelGrid::new(w, h);
    let mut occ_b = PixelGrid::new(w, h);
    seed(&mut color_b, &mut occ_b, 18, 8, WHITE, GlowParams::new(150, 255, 5));

    let mut color_ab = color_a.clone();
    let mut occ_ab = occ_a.clone();
    seed(&mut color_ab, &mut occ_ab, 18, 8, WHITE, GlowParams::new(150, 255, 5));

    let a = compute_glow(&color_a, &occ_a, &config).unwrap();
    let b = compute_glow(&color_b, &occ_b, &config).unwrap();
    let ab = compute_glow(&color_ab, &occ_ab, &config).unwrap();

    for y in 0..h as i32 {
        for x in 0..w as i32 {
            if (x, y) == (10, 10) || (x, y) == (18, 8) {
                continue;
            }
            let expected = a.alpha(x, y).unwrap().max(b.alpha(x, y).unwrap());
            assert_eq!(ab.alpha(x, y), Some(expected), "at ({}, {})", x, y);
        }
    }
    // each seed blocks the other at its own location
    assert_eq!(ab.alpha(18, 8), Some(0));
    assert_eq!(ab.alpha(10, 10), Some(0));
}

#[test_log::test]
fn seed_order_does_not_matter() {
    let (w, h) = (30, 30);
    let mut occlusion = PixelGrid::new(w, h);
    let seeds = [(4, 4, 200, 8), (20, 6, 120, 4), (12, 22, 255, 15), (13, 22, 90, 3)];
    for &(x, y, start, dist) in &seeds {
        occlusion.set_pixel(x, y, &GlowParams::new(start, 255, dist).to_rgba8());
    }
    occlusion.set_pixel(10, 10, &GlowParams::OCCLUDER.to_rgba8());

    let run = |order: &[(i32, i32, u32, u32)]| {
        let mut output = PixelGrid::new(w, h);
        let mut p = GlowPropagator::new(w, h, false);
        for &(x, y, start, dist) in order {
            let params = GlowParams::new(start, 255, dist);
            let dec = params.decrement_per_step(0).unwrap() as i32;
            p.propagate(
                &occlusion,
                &mut output,
                x,
                y,
                WHITE,
                params.adjusted_starting_alpha() as i32,
                dec,
                true,
            );
        }
        output
    };

    let forward = run(&seeds);
    let mut reversed = seeds;
    reversed.reverse();
    assert_eq!(forward, run(&reversed));
}

#[test_log::test]
fn glow_wraps_around_thin_occluder() {
    let (w, h) = (21, 21);
    let mut color = PixelGrid::new(w, h);
    let mut occlusion = PixelGrid::new(w, h);
    seed(&mut color, &mut occlusion, 3, 10, WHITE, GlowParams::new(200, 255, 20));
    for y in 7..=13 {
        occlusion.set_pixel(6, y, &GlowParams::OCCLUDER.to_rgba8());
    }

    let out = compute_glow(&color, &occlusion, &GlowConfig::default()).unwrap();

    for y in 7..=13 {
        assert_eq!(out.alpha(6, y), Some(0), "strip pixel (6, {})", y);
    }
    // unoccluded this would be 6 hops (140); around the strip end it is 8
    assert_eq!(out.alpha(9, 10), Some(120));
    // the strip ends are reachable directly
    assert_eq!(out.alpha(6, 6), Some(160));
}

#[test_log::test]
fn corner_seed_stays_in_bounds() {
    let mut color = PixelGrid::new(6, 6);
    let mut occlusion = PixelGrid::new(6, 6);
    seed(&mut color, &mut occlusion, 0, 0, WHITE, GlowParams::new(255, 255, 5));
    seed(&mut color, &mut occlusion, 5, 5, WHITE, GlowParams::new(255, 255, 5));

    let out = compute_glow(&color, &occlusion, &GlowConfig::default()).unwrap();
    assert_eq!(out.alpha(1, 0), Some(204));
    assert_eq!(out.alpha(4, 5), Some(204));
    assert_eq!(out.alpha(4, 1), Some(51));
    assert_eq!(out.alpha(5, 0), Some(0));
}

#[test_log::test]
fn each_halo_carries_its_seed_color() {
    let red = Rgba8::new_opaque(255, 0, 0);
    let blue = Rgba8::new_opaque(0, 0, 255);
    let mut color = PixelGrid::new(40, 10);
    let mut occlusion = PixelGrid::new(40, 10);
    seed(&mut color, &mut occlusion, 5, 5, red, GlowParams::new(200, 255, 4));
    seed(&mut color, &mut occlusion, 30, 5, blue, GlowParams::new(200, 255, 4));

    let out = compute_glow(&color, &occlusion, &GlowConfig::default()).unwrap();
    for (x, _, p) in out.pixels().filter(|(_, _, p)| p.a > 0) {
        let expected = if x < 20 { red } else { blue };
        assert!(p.same_rgb(&expected));
    }
}

#[test_log::test]
fn frontier_dedup_is_transparent() {
    let canvas = busy_scene();
    let color = canvas.color().unwrap();
    let occlusion = canvas.occlusion().unwrap();

    let with = compute_glow(color, occlusion, &GlowConfig::default()).unwrap();
    let without = compute_glow(
        color,
        occlusion,
        &GlowConfig {
            dedup_frontier: false,
            ..GlowConfig::default()
        },
    )
    .unwrap();
    assert_eq!(with, without);
}

#[test_log::test]
fn occluder_bar_shadows_glow() {
    let canvas = busy_scene();
    let out = canvas.output().unwrap().clone();
    let mut canvas = canvas;
    canvas.compute_glow();
    let out_after = canvas.output().unwrap();

    assert!(out.pixels().all(|(_, _, p)| p.a == 0));
    // the orange box glows up to the wall at x = 18 but not on it
    assert!(out_after.alpha(17, 8).unwrap() > 0);
    assert_eq!(out_after.alpha(18, 8), Some(0));
    assert_eq!(out_after.alpha(19, 8), Some(0));
    // behind the wall only the 12-hop path over its top end arrives:
    // 220 - 12 * 18 instead of 220 - 6 * 18 in the open
    assert_eq!(out_after.alpha(20, 8), Some(4));
}

#[test_log::test]
fn faint_fill_floods_without_falloff() {
    // adjusted alpha 40 over distance 60 gives a per-step decrement of 0
    let mut canvas = GlowCanvas::with_size(20, 10, GlowConfig::default());
    canvas.clear();
    let faint = Rgba8::new(200, 40, 90, 40);
    canvas
        .seed_glowing_rect(RectI::new(2, 2, 3, 3), faint, 255, 60)
        .unwrap();
    let stats = canvas.compute_glow();
    assert_eq!(stats.seeds, 4);

    let out = canvas.output().unwrap();
    for (x, y, p) in out.pixels() {
        assert_eq!(p.a, 40, "at ({}, {})", x, y);
        assert!(p.same_rgb(&faint));
    }
}

#[test_log::test]
fn config_from_json_drives_pass() {
    let config = GlowConfig::from_json_str(r#"{ "dedup_frontier": false, "min_decrement": 50 }"#)
        .unwrap();
    let mut color = PixelGrid::new(10, 1);
    let mut occlusion = PixelGrid::new(10, 1);
    seed(&mut color, &mut occlusion, 0, 0, WHITE, GlowParams::new(200, 255, 10));
    let out = compute_glow(&color, &occlusion, &config).unwrap();
    assert_eq!(out.alpha(1, 0), Some(150));
    assert_eq!(out.alpha(3, 0), Some(50));
    assert_eq!(out.alpha(4, 0), Some(0));
}
