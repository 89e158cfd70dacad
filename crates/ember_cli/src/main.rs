//! Command-line renderer for the built-in demo scenes.

mod scenes;

use anyhow::{bail, Context, Result};
use ember_renderer::render_parallel;
use log::info;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_SEED: u64 = 0;

const USAGE: &str = "usage: ember <scene> [output.png]

scenes:
  three-spheres   glass, diffuse, and metal spheres on a ground plane
  bouncing        motion-blurred spheres over a checkered ground
  cornell         Cornell box with a smoke volume
  marble          Perlin marble spheres under an area light";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let scene_name = match args.first() {
        Some(name) => name.as_str(),
        None => bail!("{USAGE}"),
    };
    let output = args.get(1).map(String::as_str).unwrap_or("render.png");

    let scene = match scene_name {
        "three-spheres" => scenes::three_spheres(DEFAULT_WIDTH),
        "bouncing" => scenes::bouncing(DEFAULT_WIDTH),
        "cornell" => scenes::cornell(DEFAULT_WIDTH),
        "marble" => scenes::marble(DEFAULT_WIDTH),
        other => bail!("unknown scene '{other}'\n\n{USAGE}"),
    };

    info!(
        "rendering '{}' at {}x{}, {} spp, depth {}",
        scene_name,
        scene.camera.image_width,
        scene.camera.image_height,
        scene.config.samples_per_pixel,
        scene.config.max_depth
    );

    let start = std::time::Instant::now();
    let buffer = render_parallel(&scene.camera, &scene.world, &scene.config, DEFAULT_SEED);
    info!("render finished in {:.1}s", start.elapsed().as_secs_f32());

    let rgba = buffer.to_rgba();
    let image = image::RgbaImage::from_raw(buffer.width, buffer.height, rgba)
        .context("image buffer has the wrong size")?;
    image
        .save(output)
        .with_context(|| format!("failed to write {output}"))?;
    info!("wrote {output}");

    Ok(())
}
