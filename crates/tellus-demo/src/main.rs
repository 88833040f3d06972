//! Demo binary: samples a configured planet's displacement and ice fields
//! over an equirectangular grid and writes debug maps.
//!
//! The planet is loaded from `planet.ron` in the config directory (a sample
//! planet is written on first run). Terrain sampling runs in parallel row
//! bands, each worker recording into a private elevation tracker that is
//! merged afterward; the merged range then drives elevation normalization
//! for the ice-coverage pass.
//!
//! Run with `cargo run -p tellus-demo`, or
//! `cargo run -p tellus-demo -- --width 2048 --out ./maps` to override.

mod maps;

use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use tellus_config::PlanetConfig;
use tellus_surface::{ElevationTracker, ShapeGenerator};
use tracing::info;

/// Tellus demo command-line arguments. CLI values override `planet.ron`.
#[derive(Parser, Debug)]
#[command(name = "tellus", about = "Tellus planet surface demo")]
struct CliArgs {
    /// Directory containing `planet.ron` (created on first run).
    #[arg(long, default_value = ".")]
    config: PathBuf,

    /// Output directory for the debug maps.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Map width in pixels; map height is width / 2.
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Log filter (e.g. "debug" or "tellus_surface=trace").
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    tellus_log::init_logging(args.log.as_deref());

    let planet = PlanetConfig::load_or_create(&args.config)?;
    info!(
        name = %planet.name,
        layers = planet.shape.layers.len(),
        ice_enabled = planet.ice.enabled,
        "Loaded planet"
    );

    let width = args.width.max(2);
    let height = width / 2;
    let mut generator = ShapeGenerator::new(planet.shape.clone());

    let (elevations, tracker) = sample_elevation_grid(&generator, width, height);
    generator.merge_tracker(&tracker);
    let (min, max) = generator.elevation_range();
    info!(min, max, "Elevation range after full pass");

    std::fs::create_dir_all(&args.out)?;

    let elevation_map = maps::render_elevation(&elevations, width, height, min, max);
    let elevation_path = args.out.join("elevation.png");
    elevation_map.save(&elevation_path)?;
    info!(path = %elevation_path.display(), "Wrote elevation map");

    if planet.ice.enabled {
        let coverage_map = maps::render_ice_coverage(
            &elevations,
            width,
            height,
            min,
            max,
            &planet.ice.settings,
        );
        let coverage_path = args.out.join("ice_coverage.png");
        coverage_map.save(&coverage_path)?;
        info!(path = %coverage_path.display(), "Wrote ice coverage map");
    }

    Ok(())
}

/// Sample the displacement field over an equirectangular grid.
///
/// Rows are split across worker threads; each worker records elevations into
/// a private tracker, and the trackers are merged once all rows are done.
/// Returns the row-major elevation grid and the merged tracker.
fn sample_elevation_grid(
    generator: &ShapeGenerator,
    width: u32,
    height: u32,
) -> (Vec<f32>, ElevationTracker) {
    let workers = (num_cpus::get().saturating_sub(2)).max(1);
    let rows_per_worker = (height as usize).div_ceil(workers);
    info!(workers, width, height, "Sampling displacement field");

    let mut elevations = vec![0.0f32; (width as usize) * (height as usize)];
    let mut tracker = ElevationTracker::new();

    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for (band, rows) in elevations
            .chunks_mut(rows_per_worker * width as usize)
            .enumerate()
        {
            let first_row = band * rows_per_worker;
            handles.push(scope.spawn(move || {
                let mut band_tracker = ElevationTracker::new();
                for (offset, value) in rows.iter_mut().enumerate() {
                    let py = first_row + offset / width as usize;
                    let px = offset % width as usize;
                    let point = equirect_point(px as u32, py as u32, width, height);
                    let displaced = generator.displace(point);
                    band_tracker.record(displaced.elevation);
                    *value = displaced.elevation;
                }
                band_tracker
            }));
        }
        for handle in handles {
            tracker.merge(&handle.join().expect("sampling worker panicked"));
        }
    });

    (elevations, tracker)
}

/// Unit-sphere point for an equirectangular pixel, Y up.
fn equirect_point(px: u32, py: u32, width: u32, height: u32) -> Vec3 {
    let lon = ((px as f32 + 0.5) / width as f32) * std::f32::consts::TAU - std::f32::consts::PI;
    let lat = std::f32::consts::FRAC_PI_2 - ((py as f32 + 0.5) / height as f32) * std::f32::consts::PI;
    Vec3::new(
        lat.cos() * lon.cos(),
        lat.sin(),
        lat.cos() * lon.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tellus_surface::{NoiseLayer, ShapeSettings};

    #[test]
    fn test_equirect_points_are_unit_length() {
        for py in 0..16 {
            for px in 0..32 {
                let p = equirect_point(px, py, 32, 16);
                assert!(
                    (p.length() - 1.0).abs() < 1e-5,
                    "Pixel ({px}, {py}) maps off the sphere: |p| = {}",
                    p.length()
                );
            }
        }
    }

    #[test]
    fn test_equirect_poles_and_equator() {
        let north = equirect_point(0, 0, 64, 32);
        assert!(north.y > 0.99, "Top row should be near the north pole");
        let south = equirect_point(0, 31, 64, 32);
        assert!(south.y < -0.99, "Bottom row should be near the south pole");
        let equator = equirect_point(16, 16, 64, 32);
        assert!(equator.y.abs() < 0.1, "Middle row should hug the equator");
    }

    #[test]
    fn test_grid_sampling_brackets_all_elevations() {
        let generator = ShapeGenerator::new(ShapeSettings {
            radius: 1.0,
            layers: vec![NoiseLayer::standard(Default::default())],
        });
        let (elevations, tracker) = sample_elevation_grid(&generator, 64, 32);
        let (min, max) = tracker.range();
        assert_eq!(elevations.len(), 64 * 32);
        for (i, &e) in elevations.iter().enumerate() {
            assert!(
                min <= e && e <= max,
                "Sample {i} ({e}) escapes merged range [{min}, {max}]"
            );
        }
    }
}
