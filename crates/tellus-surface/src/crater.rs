//! Seeded crater fields: deterministic impact placement on the unit sphere
//! and a closed-form radial elevation profile (rim, bowl, ejecta).

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rng::Lcg64;

/// Spatial distribution used when placing crater centers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CraterDistribution {
    /// Unbiased spherical sampling.
    #[default]
    Uniform,
    /// Impacts gathered around randomly chosen cluster centers.
    Clustered,
    /// Impacts biased toward the poles.
    Polar,
}

/// Parameters for one crater field layer.
///
/// Value type with structural equality and a stable serialized form; absent
/// fields decode to the defaults below. `min_radius > max_radius` is treated
/// as a degenerate field (no craters), never a fault.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraterSettings {
    /// Number of impacts to place.
    pub crater_count: u32,
    /// Smallest crater radius, as a geodesic arc on the unit sphere.
    pub min_radius: f32,
    /// Largest crater radius.
    pub max_radius: f32,
    /// Height of the raised rim, before per-crater depth scaling.
    pub rim_height: f32,
    /// Fraction of the crater radius occupied by the rim band.
    pub rim_width: f32,
    /// Overall depth multiplier applied to the summed field.
    pub depth: f32,
    /// Seed for deterministic placement.
    pub random_seed: u32,
    /// Spatial distribution of impact centers.
    pub distribution: CraterDistribution,
    /// Outer extent of the ejecta blanket, in crater radii. Must be > 1 for
    /// any ejecta to appear.
    pub fade_distance: f32,
}

impl Default for CraterSettings {
    fn default() -> Self {
        Self {
            crater_count: 50,
            min_radius: 0.02,
            max_radius: 0.15,
            rim_height: 0.3,
            rim_width: 0.2,
            depth: 0.5,
            random_seed: 12_345,
            distribution: CraterDistribution::Uniform,
            fade_distance: 1.8,
        }
    }
}

/// One placed impact, derived deterministically from [`CraterSettings`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CraterData {
    /// Impact center on the unit sphere.
    pub center: Vec3,
    /// Crater radius as a geodesic arc.
    pub radius: f32,
    /// Per-crater scale in `[0.7, 1.3]` applied to rim height and bowl depth.
    pub depth_scale: f32,
}

/// An immutable field of craters, generated once from [`CraterSettings`].
///
/// Construction draws the full crater list from the seeded [`Lcg64`]; the
/// same settings always reproduce the identical ordered list. Evaluation is
/// pure, so a field can be shared read-only across worker threads.
#[derive(Clone, Debug)]
pub struct CraterField {
    settings: CraterSettings,
    craters: Vec<CraterData>,
}

impl CraterField {
    /// Generate the crater list for the given settings.
    pub fn new(settings: CraterSettings) -> Self {
        let craters = generate_craters(&settings);
        Self { settings, craters }
    }

    /// The placed craters, in generation order.
    pub fn craters(&self) -> &[CraterData] {
        &self.craters
    }

    /// Return a reference to the generating settings.
    pub fn settings(&self) -> &CraterSettings {
        &self.settings
    }

    /// Summed elevation contribution of every crater at a unit-sphere point,
    /// scaled by the field's depth multiplier.
    pub fn evaluate(&self, point: Vec3) -> f32 {
        let mut elevation = 0.0;
        for crater in &self.craters {
            elevation += self.crater_elevation(point, crater);
        }
        elevation * self.settings.depth
    }

    /// Contribution of a single crater at `point`.
    fn crater_elevation(&self, point: Vec3, crater: &CraterData) -> f32 {
        if crater.radius <= 0.0 {
            return 0.0;
        }

        let distance = geodesic_distance(point, crater.center);
        let normalized = distance / crater.radius;
        let fade = self.settings.fade_distance;

        if normalized > fade {
            0.0
        } else if normalized <= 1.0 {
            self.interior_profile(normalized, crater)
        } else if fade > 1.0 {
            let fade_factor = ((fade - normalized) / (fade - 1.0)).max(0.0);
            self.ejecta_profile(normalized, crater) * fade_factor
        } else {
            0.0
        }
    }

    /// Rim bump and bowl depression for `normalized <= 1`.
    fn interior_profile(&self, normalized: f32, crater: &CraterData) -> f32 {
        let rim_width = self.settings.rim_width;
        let rim_height = self.settings.rim_height * crater.depth_scale;

        if normalized <= rim_width && rim_width > 0.0 {
            // Half-sine bump across the rim band.
            libm::sinf(normalized / rim_width * PI) * rim_height
        } else if rim_width < 1.0 {
            let interior = (normalized - rim_width) / (1.0 - rim_width);
            -smoothstep(0.0, 1.0, interior) * crater.depth_scale
        } else {
            // Rim covers the whole interior; nothing left to depress.
            0.0
        }
    }

    /// Raised ejecta blanket outside the rim, before the linear fade.
    fn ejecta_profile(&self, normalized: f32, crater: &CraterData) -> f32 {
        let ejecta = 1.0 - smoothstep(1.0, self.settings.fade_distance, normalized);
        ejecta * self.settings.rim_height * crater.depth_scale * 0.3
    }
}

/// Great-circle distance between two unit vectors.
fn geodesic_distance(a: Vec3, b: Vec3) -> f32 {
    libm::acosf(a.dot(b).clamp(-1.0, 1.0))
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let span = edge1 - edge0;
    if span <= f32::EPSILON {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

fn generate_craters(settings: &CraterSettings) -> Vec<CraterData> {
    if settings.min_radius > settings.max_radius {
        return Vec::new();
    }

    let mut rng = Lcg64::new(settings.random_seed);
    let mut craters = Vec::with_capacity(settings.crater_count as usize);

    for _ in 0..settings.crater_count {
        let center = sample_center(settings.distribution, &mut rng);
        let radius = rng.random_range(settings.min_radius..=settings.max_radius);
        let depth_scale = rng.random_range(0.7..=1.3_f32);
        craters.push(CraterData {
            center,
            radius,
            depth_scale,
        });
    }

    craters
}

fn sample_center(distribution: CraterDistribution, rng: &mut Lcg64) -> Vec3 {
    match distribution {
        CraterDistribution::Uniform => sample_uniform(rng),
        CraterDistribution::Clustered => sample_clustered(rng),
        CraterDistribution::Polar => sample_polar(rng),
    }
}

/// Inverse-CDF spherical sampling: uniform azimuth, uniform cos(polar angle).
fn sample_uniform(rng: &mut Lcg64) -> Vec3 {
    let u: f32 = rng.random();
    let v: f32 = rng.random();
    sphere_point(u, v)
}

/// A cluster center is drawn first, then a second uniform point is pulled
/// toward it; the blend keeps the result near the cluster center.
fn sample_clustered(rng: &mut Lcg64) -> Vec3 {
    let cluster_center = sample_uniform(rng);
    let blend: f32 = rng.random_range(0.1..=0.3);
    let point = sample_uniform(rng);
    cluster_center.lerp(point, blend).normalize()
}

/// Exponent applied to the polar draw; values < 1 push cos(polar) toward 1.
const POLAR_BIAS: f32 = 0.3;

fn sample_polar(rng: &mut Lcg64) -> Vec3 {
    let u: f32 = rng.random();
    let v: f32 = rng.random();
    sphere_point(u, libm::powf(v, POLAR_BIAS))
}

/// Map two unit draws to a point on the unit sphere, Y up.
fn sphere_point(u: f32, v: f32) -> Vec3 {
    let theta = TAU * u;
    let cos_phi = (2.0 * v - 1.0).clamp(-1.0, 1.0);
    let sin_phi = libm::sqrtf((1.0 - cos_phi * cos_phi).max(0.0));
    Vec3::new(
        sin_phi * libm::cosf(theta),
        cos_phi,
        sin_phi * libm::sinf(theta),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    /// A point at exactly `arc` radians from `center` along a great circle.
    fn point_at_arc(center: Vec3, arc: f32) -> Vec3 {
        let ortho = center.cross(Vec3::new(0.371, -0.557, 0.743)).normalize();
        center * arc.cos() + ortho * arc.sin()
    }

    fn single_crater_field() -> CraterField {
        CraterField::new(CraterSettings {
            crater_count: 1,
            min_radius: 0.1,
            max_radius: 0.1,
            depth: 1.0,
            ..CraterSettings::default()
        })
    }

    #[test]
    fn test_identical_settings_identical_craters() {
        let a = CraterField::new(CraterSettings::default());
        let b = CraterField::new(CraterSettings::default());
        assert_eq!(a.craters().len(), b.craters().len());
        for (i, (ca, cb)) in a.craters().iter().zip(b.craters()).enumerate() {
            assert_eq!(ca, cb, "Crater {i} differs between constructions");
        }
    }

    #[test]
    fn test_different_seeds_different_craters() {
        let a = CraterField::new(CraterSettings {
            random_seed: 1,
            ..CraterSettings::default()
        });
        let b = CraterField::new(CraterSettings {
            random_seed: 2,
            ..CraterSettings::default()
        });
        let any_different = a
            .craters()
            .iter()
            .zip(b.craters())
            .any(|(ca, cb)| ca != cb);
        assert!(any_different, "Different seeds must move the craters");
    }

    #[test]
    fn test_crater_parameters_within_bounds() {
        let field = CraterField::new(CraterSettings {
            crater_count: 200,
            ..CraterSettings::default()
        });
        assert_eq!(field.craters().len(), 200);
        for (i, crater) in field.craters().iter().enumerate() {
            assert!(
                (crater.center.length() - 1.0).abs() < 1e-4,
                "Crater {i} center not on the unit sphere: {}",
                crater.center.length()
            );
            assert!(
                crater.radius >= 0.02 && crater.radius <= 0.15,
                "Crater {i} radius out of range: {}",
                crater.radius
            );
            assert!(
                crater.depth_scale >= 0.7 && crater.depth_scale <= 1.3,
                "Crater {i} depth scale out of range: {}",
                crater.depth_scale
            );
        }
    }

    #[test]
    fn test_polar_distribution_biased_toward_pole() {
        let polar = CraterField::new(CraterSettings {
            crater_count: 300,
            distribution: CraterDistribution::Polar,
            ..CraterSettings::default()
        });
        let mean_y: f32 = polar.craters().iter().map(|c| c.center.y).sum::<f32>() / 300.0;
        assert!(
            mean_y > 0.3,
            "Polar placement should favour the northern pole, mean y = {mean_y}"
        );
    }

    #[test]
    fn test_clustered_centers_stay_unit_length() {
        let field = CraterField::new(CraterSettings {
            crater_count: 100,
            distribution: CraterDistribution::Clustered,
            ..CraterSettings::default()
        });
        for crater in field.craters() {
            assert!(
                (crater.center.length() - 1.0).abs() < 1e-4,
                "Clustered center drifted off the sphere: {}",
                crater.center.length()
            );
        }
    }

    #[test]
    fn test_inverted_radius_range_is_degenerate() {
        let field = CraterField::new(CraterSettings {
            min_radius: 0.2,
            max_radius: 0.1,
            ..CraterSettings::default()
        });
        assert!(field.craters().is_empty());
        assert_eq!(field.evaluate(Vec3::Y), 0.0);
    }

    #[test]
    fn test_zero_count_contributes_nothing() {
        let field = CraterField::new(CraterSettings {
            crater_count: 0,
            ..CraterSettings::default()
        });
        assert_eq!(field.evaluate(Vec3::X), 0.0);
    }

    #[test]
    fn test_rim_raised_bowl_depressed() {
        let field = single_crater_field();
        let crater = field.craters()[0];
        let rim_width = field.settings().rim_width;

        for i in 1..10 {
            let d = rim_width * i as f32 / 10.0;
            let v = field.evaluate(point_at_arc(crater.center, d * crater.radius));
            assert!(v >= 0.0, "Rim at normalized distance {d} must be raised, got {v}");
        }

        for i in 1..10 {
            let d = rim_width + (1.0 - rim_width) * i as f32 / 10.0;
            let v = field.evaluate(point_at_arc(crater.center, d * crater.radius));
            assert!(
                v <= 0.0,
                "Bowl at normalized distance {d} must be depressed, got {v}"
            );
        }
    }

    #[test]
    fn test_ejecta_band_small_and_positive() {
        let field = single_crater_field();
        let crater = field.craters()[0];
        let fade = field.settings().fade_distance;
        let rim_peak = field.settings().rim_height * crater.depth_scale;

        for i in 1..10 {
            let d = 1.0 + (fade - 1.0) * i as f32 / 10.0 - 1e-3;
            let v = field.evaluate(point_at_arc(crater.center, d * crater.radius));
            assert!(v >= 0.0, "Ejecta at {d} must not dig, got {v}");
            assert!(
                v <= rim_peak * 0.3 * field.settings().depth + EPSILON,
                "Ejecta at {d} exceeds its cap: {v}"
            );
        }
    }

    #[test]
    fn test_no_contribution_beyond_fade_distance() {
        let field = single_crater_field();
        let crater = field.craters()[0];
        let beyond = field.settings().fade_distance * crater.radius + 0.05;
        let v = field.evaluate(point_at_arc(crater.center, beyond));
        assert_eq!(v, 0.0, "Field must vanish past the fade distance, got {v}");
    }

    #[test]
    fn test_fade_distance_at_one_has_no_ejecta() {
        let field = CraterField::new(CraterSettings {
            crater_count: 1,
            min_radius: 0.1,
            max_radius: 0.1,
            fade_distance: 1.0,
            depth: 1.0,
            ..CraterSettings::default()
        });
        let crater = field.craters()[0];
        let v = field.evaluate(point_at_arc(crater.center, 1.05 * crater.radius));
        assert_eq!(v, 0.0, "fade_distance 1.0 leaves no ejecta band, got {v}");
    }

    #[test]
    fn test_depth_scales_whole_field() {
        let shallow = CraterField::new(CraterSettings {
            depth: 0.25,
            ..CraterSettings::default()
        });
        let deep = CraterField::new(CraterSettings {
            depth: 1.0,
            ..CraterSettings::default()
        });
        let p = Vec3::new(0.48, 0.6, 0.64).normalize();
        assert!(
            (shallow.evaluate(p) - deep.evaluate(p) * 0.25).abs() < EPSILON,
            "Depth must scale contributions linearly"
        );
    }

    #[test]
    fn test_settings_roundtrip_with_missing_fields() {
        let settings = CraterSettings {
            distribution: CraterDistribution::Polar,
            random_seed: 777,
            ..CraterSettings::default()
        };
        let text = ron::to_string(&settings).unwrap();
        let back: CraterSettings = ron::from_str(&text).unwrap();
        assert_eq!(settings, back);

        // Older data without the newer fields decodes to the defaults.
        let sparse: CraterSettings = ron::from_str("(crater_count: 7)").unwrap();
        assert_eq!(sparse.crater_count, 7);
        assert_eq!(sparse.distribution, CraterDistribution::Uniform);
        assert_eq!(sparse.fade_distance, CraterSettings::default().fade_distance);
    }
}
