//! The pure ice-coverage and noise-modulation fields.

use glam::Vec3;
use noise::NoiseFn;
use tellus_noise::HashNoise;

use crate::settings::IceCapSettings;

/// Fraction of ice material blending at a surface point, in `[0, 1]`.
///
/// Latitude is the Y component of the normalized world position. Each cap
/// contributes a falloff-shaped term past its threshold; the larger term
/// wins, the elevation gate and global temperature then attenuate it.
/// `elevation` must be in the same space as the settings' elevation bounds,
/// typically the session's elevation range normalized to `[0, 1]`.
///
/// All denominators that can reach zero (a cap threshold at its pole, a
/// collapsed elevation window) clamp instead of producing infinities.
pub fn coverage(world_position: Vec3, elevation: f32, settings: &IceCapSettings) -> f32 {
    let latitude = match world_position.try_normalize() {
        Some(normalized) => normalized.y,
        None => return 0.0,
    };

    let mut cover: f32 = 0.0;

    if latitude > settings.north_cap_threshold {
        let span = (1.0 - settings.north_cap_threshold).max(f32::EPSILON);
        let north_factor = (latitude - settings.north_cap_threshold) / span;
        cover = cover.max(falloff(north_factor, settings.falloff_sharpness));
    }

    if latitude < settings.south_cap_threshold {
        let span = (1.0 + settings.south_cap_threshold).max(f32::EPSILON);
        let south_factor = (settings.south_cap_threshold - latitude) / span;
        cover = cover.max(falloff(south_factor, settings.falloff_sharpness));
    }

    if settings.use_elevation_mask && cover > 0.0 {
        cover *= smoothstep(
            settings.min_elevation_for_ice,
            settings.max_elevation_for_ice,
            elevation,
        );
    }

    cover *= (1.0 - settings.global_temperature * 0.5).max(0.0);
    cover.clamp(0.0, 1.0)
}

/// Multiplicative ice variation factor, centered on 1.0.
///
/// Sums `noise_octaves` of hash lattice noise (amplitude halving, frequency
/// doubling) at `world_position * noise_scale` and returns
/// `1 + accumulated * noise_strength`. This is not itself a coverage value;
/// callers compose it onto [`coverage`] wherever their material pipeline
/// applies detail variation, and re-clamp. Returns exactly 1.0 when
/// `use_noise_variation` is off.
pub fn noise_modulation(world_position: Vec3, settings: &IceCapSettings) -> f32 {
    if !settings.use_noise_variation {
        return 1.0;
    }

    let primitive = HashNoise;
    let scaled = world_position * settings.noise_scale;

    let mut total: f32 = 0.0;
    let mut amplitude: f32 = 1.0;
    let mut frequency: f32 = 1.0;

    for _ in 0..settings.noise_octaves {
        let p = scaled * frequency;
        total += amplitude * primitive.get([p.x as f64, p.y as f64, p.z as f64]) as f32;
        amplitude *= 0.5;
        frequency *= 2.0;
    }

    1.0 + total * settings.noise_strength
}

fn falloff(factor: f32, sharpness: f32) -> f32 {
    let exponent = 1.0 / sharpness.max(f32::EPSILON);
    libm::powf(factor.max(0.0), exponent)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let span = edge1 - edge0;
    if span <= f32::EPSILON {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
