//! Layer compositing: an ordered stack of noise and crater layers displacing
//! the unit sphere into terrain.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tellus_noise::{FractalNoise, NoiseSettings};

use crate::crater::{CraterField, CraterSettings};
use crate::elevation::ElevationTracker;

/// Which evaluator a layer drives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerType {
    /// Fractal noise terrain.
    #[default]
    Standard,
    /// A seeded crater field.
    Craters,
}

/// One entry in the ordered layer stack of a planet shape.
///
/// Order is semantically significant: layer 0 is always the mask source for
/// layers that enable `use_first_layer_as_mask`. The serialized form is
/// field-for-field; absent `layer_type` decodes as `Standard`, so older
/// stored planets keep working.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseLayer {
    /// Disabled layers contribute nothing.
    pub enabled: bool,
    /// Multiply this layer's contribution by layer 0's value at the point.
    pub use_first_layer_as_mask: bool,
    /// Noise parameters, used when `layer_type` is `Standard`.
    pub noise_settings: NoiseSettings,
    /// Crater parameters, present when `layer_type` is `Craters`.
    pub crater_settings: Option<CraterSettings>,
    /// Selects the evaluator for this slot.
    pub layer_type: LayerType,
}

impl Default for NoiseLayer {
    fn default() -> Self {
        Self {
            enabled: true,
            use_first_layer_as_mask: true,
            noise_settings: NoiseSettings::default(),
            crater_settings: None,
            layer_type: LayerType::Standard,
        }
    }
}

impl NoiseLayer {
    /// A standard fractal-noise layer.
    pub fn standard(noise_settings: NoiseSettings) -> Self {
        Self {
            noise_settings,
            ..Self::default()
        }
    }

    /// A crater-field layer.
    pub fn craters(crater_settings: CraterSettings) -> Self {
        Self {
            crater_settings: Some(crater_settings),
            layer_type: LayerType::Craters,
            ..Self::default()
        }
    }
}

/// The full shape description of a planet surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSettings {
    /// Base planet radius; final elevations are multiples of it.
    pub radius: f32,
    /// Ordered layer stack. Layer 0 is the mask source.
    pub layers: Vec<NoiseLayer>,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            radius: 1.0,
            layers: Vec::new(),
        }
    }
}

/// A unit-sphere point displaced to its final terrain position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacedPoint {
    /// Final vertex position: `unit_point * elevation`.
    pub position: Vec3,
    /// Final radial elevation, `radius * (1 + summed layer values)`.
    pub elevation: f32,
}

/// The evaluator constructed for one layer slot, dispatched by tag.
///
/// Exactly one evaluator exists per layer; a crater slot never builds a
/// noise evaluator, so slot indices cannot drift apart.
#[derive(Clone, Debug)]
enum LayerEvaluator {
    Noise(FractalNoise),
    Craters(CraterField),
}

impl LayerEvaluator {
    fn for_layer(layer: &NoiseLayer) -> Self {
        match layer.layer_type {
            LayerType::Standard => Self::Noise(FractalNoise::new(layer.noise_settings.clone())),
            LayerType::Craters => Self::Craters(CraterField::new(
                layer.crater_settings.clone().unwrap_or_default(),
            )),
        }
    }

    fn evaluate(&self, point: Vec3) -> f32 {
        match self {
            Self::Noise(noise) => noise.evaluate(point),
            Self::Craters(field) => field.evaluate(point),
        }
    }
}

/// Walks the layer stack to displace unit-sphere points, keeping a running
/// elevation range for the session.
///
/// [`displace`](Self::displace) is pure and safe to call from any number of
/// threads sharing the generator read-only;
/// [`point_on_planet`](Self::point_on_planet) additionally records into the
/// generator's private tracker and therefore needs exclusive access. Parallel
/// callers displace through a shared reference, record into per-worker
/// [`ElevationTracker`]s, and [`merge_tracker`](Self::merge_tracker) the
/// results afterward.
pub struct ShapeGenerator {
    settings: ShapeSettings,
    evaluators: Vec<LayerEvaluator>,
    tracker: ElevationTracker,
}

impl ShapeGenerator {
    /// Build one evaluator per layer and start an empty session.
    pub fn new(settings: ShapeSettings) -> Self {
        let evaluators = settings.layers.iter().map(LayerEvaluator::for_layer).collect();
        Self {
            settings,
            evaluators,
            tracker: ElevationTracker::new(),
        }
    }

    /// Displace a unit-sphere point without touching session state.
    pub fn displace(&self, unit_point: Vec3) -> DisplacedPoint {
        let mut first_layer_value = 0.0;
        let mut elevation = 0.0;

        if let Some(layer) = self.settings.layers.first()
            && layer.enabled
            && let Some(evaluator) = self.evaluators.first()
        {
            first_layer_value = evaluator.evaluate(unit_point);
            elevation = first_layer_value;
        }

        for (layer, evaluator) in self.settings.layers.iter().zip(&self.evaluators).skip(1) {
            if !layer.enabled {
                continue;
            }
            let mask = if layer.use_first_layer_as_mask {
                first_layer_value
            } else {
                1.0
            };
            elevation += evaluator.evaluate(unit_point) * mask;
        }

        let elevation = self.settings.radius * (1.0 + elevation);
        DisplacedPoint {
            position: unit_point * elevation,
            elevation,
        }
    }

    /// Displace a point and record its elevation into the session tracker.
    pub fn point_on_planet(&mut self, unit_point: Vec3) -> Vec3 {
        let displaced = self.displace(unit_point);
        self.tracker.record(displaced.elevation);
        displaced.position
    }

    /// Fold a worker's private tracker into the session tracker.
    pub fn merge_tracker(&mut self, tracker: &ElevationTracker) {
        self.tracker.merge(tracker);
    }

    /// Min/max of every elevation recorded since the session began.
    ///
    /// Only meaningful after a full generation pass; this is the sole source
    /// of truth for elevation-dependent coverage and material parameters.
    pub fn elevation_range(&self) -> (f32, f32) {
        self.tracker.range()
    }

    /// Discard the recorded range and start a new generation session.
    pub fn reset_session(&mut self) {
        self.tracker = ElevationTracker::new();
    }

    /// Return a reference to the shape settings.
    pub fn settings(&self) -> &ShapeSettings {
        &self.settings
    }
}

/// One-shot displacement for callers without a long-lived generator.
///
/// Constructing a [`ShapeGenerator`] once and reusing it is much cheaper when
/// displacing a whole mesh; this exists for one-off queries.
pub fn displace_point(unit_point: Vec3, settings: &ShapeSettings) -> Vec3 {
    ShapeGenerator::new(settings.clone())
        .displace(unit_point)
        .position
}
