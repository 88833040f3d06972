//! Ice cap settings: coverage thresholds, appearance, and climate controls.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Configuration for procedural polar ice caps.
///
/// Value type: compared field-for-field, persisted field-for-field with
/// `ice_color` encoded as a 3-element sequence; absent fields decode to the
/// defaults below. The coverage math reads the threshold, falloff, elevation,
/// noise, and temperature fields; the appearance and flow fields are carried
/// through to the material layer untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IceCapSettings {
    /// Latitude where the northern cap begins (0 = equator, 1 = north pole).
    pub north_cap_threshold: f32,
    /// Latitude where the southern cap begins (0 = equator, -1 = south pole).
    pub south_cap_threshold: f32,
    /// Cap edge falloff; higher values give sharper edges.
    pub falloff_sharpness: f32,

    /// Gate coverage on elevation.
    pub use_elevation_mask: bool,
    /// Elevation (in the caller's normalized space) below which ice never forms.
    pub min_elevation_for_ice: f32,
    /// Elevation at and above which the elevation gate is fully open.
    pub max_elevation_for_ice: f32,

    /// Base ice shell thickness, in planet radii.
    pub ice_thickness: f32,
    /// Base albedo in linear RGB.
    pub ice_color: Vec3,
    /// Surface roughness: 0.0 = mirror-smooth, 1.0 = fully rough.
    pub ice_roughness: f32,
    /// Metallic factor: ice is a dielectric, so near zero.
    pub ice_metallic: f32,
    /// Subsurface scattering intensity.
    pub ice_subsurface: f32,

    /// Apply the noise-variation field.
    pub use_noise_variation: bool,
    /// Spatial scale of the variation noise.
    pub noise_scale: f32,
    /// Amplitude of the variation around 1.0.
    pub noise_strength: f32,
    /// Octaves of variation detail.
    pub noise_octaves: u32,

    /// Global temperature offset (-1 = ice age, 1 = greenhouse).
    pub global_temperature: f32,
    /// Seasonal swing strength (0 = no seasons).
    pub seasonal_variation: f32,
    /// Season phase in radians (0 = summer, pi = winter).
    pub season_angle: f32,

    /// Enable flow-pattern generation in the material layer.
    pub enable_ice_flow: bool,
    /// Spatial scale of flow patterns.
    pub ice_flow_scale: f32,
    /// Crack and crevasse intensity.
    pub cracks_intensity: f32,
}

impl Default for IceCapSettings {
    fn default() -> Self {
        Self {
            north_cap_threshold: 0.7,
            south_cap_threshold: -0.7,
            falloff_sharpness: 2.0,
            use_elevation_mask: true,
            min_elevation_for_ice: 0.3,
            max_elevation_for_ice: 0.8,
            ice_thickness: 0.02,
            ice_color: Vec3::new(0.9, 0.95, 1.0),
            ice_roughness: 0.15,
            ice_metallic: 0.05,
            ice_subsurface: 0.3,
            use_noise_variation: true,
            noise_scale: 8.0,
            noise_strength: 0.2,
            noise_octaves: 3,
            global_temperature: 0.0,
            seasonal_variation: 0.1,
            season_angle: 0.0,
            enable_ice_flow: false,
            ice_flow_scale: 2.0,
            cracks_intensity: 0.1,
        }
    }
}

impl IceCapSettings {
    /// Modest polar caps gated on elevation, like Earth.
    pub fn earth_like() -> Self {
        Self {
            north_cap_threshold: 0.75,
            south_cap_threshold: -0.75,
            falloff_sharpness: 3.0,
            use_elevation_mask: true,
            min_elevation_for_ice: 0.4,
            ice_color: Vec3::new(0.92, 0.96, 1.0),
            global_temperature: 0.0,
            ..Self::default()
        }
    }

    /// Caps reaching low latitudes on a deep-frozen world.
    pub fn icy_world() -> Self {
        Self {
            north_cap_threshold: 0.3,
            south_cap_threshold: -0.3,
            falloff_sharpness: 1.5,
            use_elevation_mask: false,
            ice_thickness: 0.05,
            ice_color: Vec3::new(0.85, 0.9, 0.95),
            global_temperature: -0.8,
            ..Self::default()
        }
    }

    /// Thin high-altitude frost on a hot world.
    pub fn desert() -> Self {
        Self {
            north_cap_threshold: 0.95,
            south_cap_threshold: -0.95,
            falloff_sharpness: 5.0,
            use_elevation_mask: true,
            min_elevation_for_ice: 0.8,
            ice_thickness: 0.005,
            global_temperature: 0.7,
            ..Self::default()
        }
    }
}

/// Ice caps toggle plus settings, as persisted per planet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IceCapConfig {
    /// Whether the caps are rendered at all.
    pub enabled: bool,
    /// Cap parameters used when enabled.
    pub settings: IceCapSettings,
}

impl Default for IceCapConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            settings: IceCapSettings::earth_like(),
        }
    }
}

impl IceCapConfig {
    /// Caps off.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Earth-like caps, enabled.
    pub fn earth_like() -> Self {
        Self {
            enabled: true,
            settings: IceCapSettings::earth_like(),
        }
    }

    /// Frozen-world caps, enabled.
    pub fn icy_world() -> Self {
        Self {
            enabled: true,
            settings: IceCapSettings::icy_world(),
        }
    }

    /// Desert-world frost, enabled.
    pub fn desert() -> Self {
        Self {
            enabled: true,
            settings: IceCapSettings::desert(),
        }
    }
}
