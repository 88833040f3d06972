//! Multi-octave fractal noise over a pluggable coherent-noise primitive.
//!
//! Composites octaves of 3D noise sampled on the unit sphere, remapped to
//! `[0, 1]` per octave, with a configurable floor and output scale. This is
//! the "standard" layer evaluator for planet shapes.

use glam::Vec3;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Seed shared by every terrain noise evaluator.
///
/// The terrain noise field is one fixed function of space; per-layer variation
/// comes from [`NoiseSettings`] (frequency, amplitude, center offset), not
/// from reseeding the primitive.
pub const TERRAIN_NOISE_SEED: u32 = 0;

/// Parameters for one fractal noise field.
///
/// Plain value type: compared field-for-field, persisted field-for-field with
/// the center vector encoded as a 3-element sequence. Absent fields decode to
/// the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Number of octaves to composite. Zero octaves yield a flat field.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f32,
    /// Frequency of the first octave.
    pub base_roughness: f32,
    /// Scale applied to the accumulated value after the floor.
    pub strength: f32,
    /// Frequency multiplier between successive octaves.
    pub roughness: f32,
    /// Offset added to the sample position, in noise space.
    pub center: Vec3,
    /// Floor subtracted from the accumulated value; anything below it reads
    /// as zero elevation (raises sea level, in effect).
    pub min_value: f32,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.5,
            base_roughness: 1.0,
            strength: 0.1,
            roughness: 2.0,
            center: Vec3::ZERO,
            min_value: 0.5,
        }
    }
}

/// Evaluates a multi-octave fractal noise field at points on the unit sphere.
///
/// Generic over the coherent-noise primitive so other fields can reuse the
/// octave loop; the terrain default is Perlin with [`TERRAIN_NOISE_SEED`].
/// Evaluation is pure and bit-for-bit reproducible for identical inputs.
#[derive(Clone, Debug)]
pub struct FractalNoise<N = Perlin> {
    primitive: N,
    settings: NoiseSettings,
}

impl FractalNoise<Perlin> {
    /// Create a terrain evaluator over the shared Perlin field.
    pub fn new(settings: NoiseSettings) -> Self {
        Self {
            primitive: Perlin::new(TERRAIN_NOISE_SEED),
            settings,
        }
    }
}

impl<N: NoiseFn<f64, 3>> FractalNoise<N> {
    /// Create an evaluator over a caller-supplied primitive.
    pub fn with_primitive(primitive: N, settings: NoiseSettings) -> Self {
        Self {
            primitive,
            settings,
        }
    }

    /// Evaluate the field at a point on the unit sphere.
    ///
    /// Each octave samples the primitive at `point * frequency + center`,
    /// remaps the raw `[-1, 1]` value to `[0, 1]`, and accumulates it scaled
    /// by the running amplitude. The accumulated value is floored by
    /// `min_value` and scaled by `strength`; the result is never negative.
    pub fn evaluate(&self, point: Vec3) -> f32 {
        let mut total: f32 = 0.0;
        let mut frequency = self.settings.base_roughness;
        let mut amplitude: f32 = 1.0;

        for _ in 0..self.settings.octaves {
            let sample = point * frequency + self.settings.center;
            let raw = self
                .primitive
                .get([sample.x as f64, sample.y as f64, sample.z as f64])
                as f32;
            total += (raw + 1.0) * 0.5 * amplitude;

            frequency *= self.settings.roughness;
            amplitude *= self.settings.persistence;
        }

        (total - self.settings.min_value).max(0.0) * self.settings.strength
    }

    /// Theoretical maximum of the accumulated (pre-floor, pre-scale) value:
    /// the geometric series of octave amplitudes.
    pub fn max_accumulated(&self) -> f32 {
        let mut sum: f32 = 0.0;
        let mut amp: f32 = 1.0;
        for _ in 0..self.settings.octaves {
            sum += amp;
            amp *= self.settings.persistence;
        }
        sum
    }

    /// Return a reference to the current settings.
    pub fn settings(&self) -> &NoiseSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn test_settings() -> NoiseSettings {
        NoiseSettings {
            octaves: 4,
            persistence: 0.5,
            base_roughness: 1.0,
            strength: 0.3,
            roughness: 2.0,
            center: Vec3::ZERO,
            min_value: 0.2,
        }
    }

    #[test]
    fn test_same_point_same_value() {
        let a = FractalNoise::new(test_settings());
        let b = FractalNoise::new(test_settings());

        let p = Vec3::new(0.36, 0.48, 0.8);
        let va = a.evaluate(p);
        let vb = b.evaluate(p);
        assert!(
            (va - vb).abs() < EPSILON,
            "Two evaluators over the same settings must agree: {va} vs {vb}"
        );
        assert!(
            (va - a.evaluate(p)).abs() < EPSILON,
            "Repeated evaluation must be bit-stable"
        );
    }

    #[test]
    fn test_output_never_negative() {
        let noise = FractalNoise::new(NoiseSettings {
            min_value: 2.0,
            ..test_settings()
        });
        for i in 0..100 {
            let t = i as f32 * 0.063;
            let p = Vec3::new(t.cos(), t.sin(), (t * 0.5).sin()).normalize();
            let v = noise.evaluate(p);
            assert!(v >= 0.0, "Floored value must be non-negative, got {v} at {p}");
        }
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let noise = FractalNoise::new(NoiseSettings {
            octaves: 0,
            min_value: 0.0,
            ..test_settings()
        });
        let v = noise.evaluate(Vec3::new(0.1, 0.9, 0.2));
        assert!(
            v.abs() < EPSILON,
            "Zero octaves with zero floor must produce zero, got {v}"
        );

        // A negative floor still clamps at zero before scaling.
        let raised = FractalNoise::new(NoiseSettings {
            octaves: 0,
            min_value: -0.5,
            strength: 0.3,
            ..test_settings()
        });
        let v = raised.evaluate(Vec3::X);
        assert!(
            (v - 0.15).abs() < EPSILON,
            "Zero octaves with floor -0.5 and strength 0.3 must give 0.15, got {v}"
        );
    }

    #[test]
    fn test_continuity_under_small_steps() {
        let noise = FractalNoise::new(NoiseSettings {
            min_value: 0.0,
            ..test_settings()
        });
        let step = 1e-3;
        // Generously above the field's Lipschitz bound for these settings.
        let max_delta = step * 100.0;

        for i in 0..1_000 {
            let t = i as f32 * 0.007;
            let p = Vec3::new(t.cos(), t.sin(), 0.3).normalize();
            let q = (p + Vec3::new(step, 0.0, 0.0)).normalize();
            let delta = (noise.evaluate(p) - noise.evaluate(q)).abs();
            assert!(
                delta < max_delta,
                "Discontinuity near {p}: delta={delta} exceeds {max_delta}"
            );
        }
    }

    #[test]
    fn test_strength_scales_output() {
        let base = FractalNoise::new(NoiseSettings {
            strength: 1.0,
            min_value: 0.0,
            ..test_settings()
        });
        let scaled = FractalNoise::new(NoiseSettings {
            strength: 0.25,
            min_value: 0.0,
            ..test_settings()
        });
        let p = Vec3::new(0.6, 0.64, 0.48);
        let vb = base.evaluate(p);
        let vs = scaled.evaluate(p);
        assert!(
            (vs - vb * 0.25).abs() < EPSILON,
            "Strength must scale linearly: {vs} vs {}",
            vb * 0.25
        );
    }

    #[test]
    fn test_max_accumulated_geometric_sum() {
        let noise = FractalNoise::new(test_settings());
        let expected = 1.0 + 0.5 + 0.25 + 0.125;
        assert!(
            (noise.max_accumulated() - expected).abs() < EPSILON,
            "Expected {expected}, got {}",
            noise.max_accumulated()
        );
    }

    #[test]
    fn test_center_offsets_the_field() {
        let a = FractalNoise::new(test_settings());
        let b = FractalNoise::new(NoiseSettings {
            center: Vec3::new(13.7, 4.2, -8.9),
            ..test_settings()
        });
        let mut any_different = false;
        for i in 0..20 {
            let t = i as f32 * 0.31;
            let p = Vec3::new(t.cos(), t.sin(), 0.5).normalize();
            if (a.evaluate(p) - b.evaluate(p)).abs() > EPSILON {
                any_different = true;
                break;
            }
        }
        assert!(any_different, "A shifted center must move the field");
    }
}
