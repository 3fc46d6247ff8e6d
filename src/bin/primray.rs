//! primray: reads a scene and reports where rays hit its primitives.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::io::{self, BufRead};
use std::path::PathBuf;

use primray::core;
use primray::geom::Collision;
use primray::logging::{init_logging, LoggingConfig};
use primray::reader;
use primray::render;

#[derive(Parser)]
#[command(name = "primray")]
#[command(about = "Collides rays with the primitives of a scene", long_about = None)]
struct Cli {
    /// Scene file describing the primitives
    scene: PathBuf,

    /// A ray as `ox oy oz dx dy dz`; may be repeated. Without any, rays are read from stdin,
    /// one per line.
    #[arg(long, num_args = 6, value_names = ["OX", "OY", "OZ", "DX", "DY", "DZ"],
        allow_negative_numbers = true)]
    ray: Vec<f64>,

    /// Log filter in `env_logger` syntax (default: RUST_LOG, then info)
    #[arg(long)]
    log: Option<String>,

    /// Worker threads for batch collision (default: one per core)
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.clone().map(LoggingConfig::with_filter).unwrap_or_default());

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure the thread pool")?;
    }

    let prims = reader::read_scene_file(&cli.scene)
        .with_context(|| format!("failed to read scene {}", cli.scene.display()))?;
    info!("loaded {} primitives from {}", prims.len(), cli.scene.display());
    let stage = render::Stage::new(prims);

    let rays = if cli.ray.is_empty() {
        read_rays(io::stdin().lock())?
    }
    else {
        cli.ray.chunks_exact(6).map(ray_from_values).collect()
    };

    for line in report(&stage, &rays) {
        println!("{}", line);
    }
    Ok(())
}

/// None for a zero direction, which is reported instead of dropped so numbering follows input.
fn ray_from_values(v: &[f64]) -> Option<core::Ray> {
    let ray = core::Ray::try_new(core::Vec::new(v[0], v[1], v[2]), core::Vec::new(v[3], v[4], v[5]));
    if ray.is_none() {
        log::warn!("ray with zero direction will be skipped");
    }
    ray
}

/// One line per input ray, numbered in input order.
fn report(stage: &render::Stage, rays: &[Option<core::Ray>]) -> Vec<String> {
    let valid: Vec<core::Ray> = rays.iter().flatten().copied().collect();
    let mut hits = stage.collide_all(&valid).into_iter();
    rays.iter()
        .enumerate()
        .map(|(i, ray)| match *ray {
            Some(_) => describe(i, &hits.next().flatten()),
            None => format!("ray {}: skipped (zero direction)", i),
        })
        .collect()
}

fn read_rays<R: BufRead>(input: R) -> Result<Vec<Option<core::Ray>>> {
    let mut rays = vec![];
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let values = line.split_whitespace()
            .map(|w| w.parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("stdin line {}: expected six numbers", index + 1))?;
        if values.len() != 6 {
            bail!("stdin line {}: expected six numbers, got {}", index + 1, values.len());
        }
        rays.push(ray_from_values(&values));
    }
    Ok(rays)
}

fn describe(index: usize, hit: &Option<Collision>) -> String {
    let hit = match *hit {
        Some(ref hit) => hit,
        None => return format!("ray {}: miss", index),
    };
    let mut line = format!("ray {}: {} dist={:.6} point={} normal={} {}",
        index, hit.primitive.shape().kind(), hit.dist, hit.point, hit.normal,
        if hit.front { "front" } else { "back" });
    if let Some(color) = hit.texture_color() {
        line.push_str(&format!(" texture={}", color));
    }
    line
}
