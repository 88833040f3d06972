//! Planet surface synthesis: seeded crater fields, layer compositing, and
//! elevation-range tracking.
//!
//! The entry point for mesh builders is [`ShapeGenerator`]: feed it
//! unit-sphere vertex positions, get back displaced terrain positions, then
//! read the session's [`ShapeGenerator::elevation_range`] after a full pass.

mod crater;
mod elevation;
mod rng;
mod shape;

pub use crater::{CraterData, CraterDistribution, CraterField, CraterSettings};
pub use elevation::{AtomicMinMax, ElevationTracker};
pub use rng::Lcg64;
pub use shape::{
    DisplacedPoint, LayerType, NoiseLayer, ShapeGenerator, ShapeSettings, displace_point,
};
