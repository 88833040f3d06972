//! The planet configuration struct, presets, and RON persistence.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tellus_ice::IceCapConfig;
use tellus_noise::NoiseSettings;
use tellus_surface::{CraterSettings, NoiseLayer, ShapeSettings};

use crate::error::ConfigError;

const PLANET_FILE: &str = "planet.ron";

/// Top-level planet description persisted as `planet.ron`.
///
/// Every field decodes to its default when absent, so planet files written by
/// older versions keep loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Display name.
    pub name: String,
    /// Sample grid resolution for field consumers (vertices per face axis).
    pub resolution: u32,
    /// Terrain shape: radius and the ordered layer stack.
    pub shape: ShapeSettings,
    /// Ice cap configuration.
    pub ice: IceCapConfig,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            name: "Planet".to_string(),
            resolution: 50,
            shape: ShapeSettings::default(),
            ice: IceCapConfig::default(),
        }
    }
}

impl PlanetConfig {
    /// A small Earth-like sample planet: a masking continent layer, a detail
    /// layer, and enabled ice caps.
    pub fn sample_planet() -> Self {
        let continents = NoiseLayer::standard(NoiseSettings {
            octaves: 4,
            persistence: 0.5,
            base_roughness: 1.0,
            strength: 0.1,
            roughness: 2.0,
            center: Vec3::ZERO,
            min_value: 0.5,
        });

        let mut detail = NoiseLayer::standard(NoiseSettings {
            octaves: 3,
            persistence: 0.5,
            base_roughness: 2.0,
            strength: 0.05,
            roughness: 2.5,
            center: Vec3::ZERO,
            min_value: 0.0,
        });
        detail.use_first_layer_as_mask = false;

        Self {
            name: "Sample Planet".to_string(),
            resolution: 50,
            shape: ShapeSettings {
                radius: 1.0,
                layers: vec![continents, detail],
            },
            ice: IceCapConfig::earth_like(),
        }
    }

    /// An airless cratered body: gentle base noise plus a crater layer,
    /// no ice.
    pub fn cratered_moon() -> Self {
        let base = NoiseLayer::standard(NoiseSettings {
            octaves: 3,
            persistence: 0.5,
            base_roughness: 1.2,
            strength: 0.03,
            roughness: 2.0,
            center: Vec3::ZERO,
            min_value: 0.0,
        });

        let mut craters = NoiseLayer::craters(CraterSettings {
            crater_count: 400,
            random_seed: 20_240_820,
            ..CraterSettings::default()
        });
        craters.use_first_layer_as_mask = false;

        Self {
            name: "Cratered Moon".to_string(),
            resolution: 80,
            shape: ShapeSettings {
                radius: 1.0,
                layers: vec![base, craters],
            },
            ice: IceCapConfig::disabled(),
        }
    }

    /// Load the planet from `dir/planet.ron`, or write the sample planet
    /// there and return it.
    pub fn load_or_create(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(PLANET_FILE);

        if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadError)?;
            let config: PlanetConfig =
                ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded planet '{}' from {}", config.name, path.display());
            Ok(config)
        } else {
            let config = Self::sample_planet();
            config.save(dir)?;
            log::info!("Created sample planet at {}", path.display());
            Ok(config)
        }
    }

    /// Save the planet to `dir/planet.ron`.
    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(dir).map_err(ConfigError::WriteError)?;

        let path = dir.join(PLANET_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: `Some(new_config)` if the file differs, `None` otherwise.
    pub fn reload(&self, dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(PLANET_FILE);
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadError)?;
        let new_config: PlanetConfig =
            ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Planet file reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
