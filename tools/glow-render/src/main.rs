// Render glow scenes to BMP images.
//
// Usage:
//   glow-render <scene.json> -o <output.bmp>
//   glow-render demo -o <output.bmp>
//
// Set RUST_LOG=debug for per-pass statistics.

mod bmp;
mod scene;

use anyhow::{bail, Context, Result};
use scene::Scene;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (input, output) = parse_args(&args)?;

    let scene = match input.as_str() {
        "demo" => Scene::demo(),
        path => Scene::load(Path::new(path))?,
    };
    log::info!(
        "rendering {}x{} scene with {} shapes",
        scene.width,
        scene.height,
        scene.shapes.len()
    );

    let (canvas, stats) = scene.render()?;
    let Some(surface) = canvas.surface() else {
        bail!("canvas has no surface");
    };
    bmp::save_bmp(&output, surface)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "{}: {} seeds, {} pixels written ({} invalid seeds)",
        output.display(),
        stats.seeds,
        stats.written,
        stats.invalid_seeds
    );
    Ok(())
}

fn parse_args(args: &[String]) -> Result<(String, PathBuf)> {
    let mut input = None;
    let mut output = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("-o needs a file name\n{}", usage());
                };
                output = Some(PathBuf::from(path));
                i += 2;
            }
            "-h" | "--help" => {
                println!("{}", usage());
                std::process::exit(0);
            }
            arg if input.is_none() => {
                input = Some(arg.to_string());
                i += 1;
            }
            arg => bail!("unexpected argument {:?}\n{}", arg, usage()),
        }
    }
    match (input, output) {
        (Some(input), Some(output)) => Ok((input, output)),
        _ => bail!("{}", usage()),
    }
}

fn usage() -> &'static str {
    "usage:\n  glow-render <scene.json> -o <output.bmp>\n  glow-render demo -o <output.bmp>"
}
